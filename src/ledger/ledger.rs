use super::*;
use crate::BotStrategy;
use crate::Earnings;
use crate::EarningsUpdate;
use crate::Pairing;
use crate::ParticipantId;
use crate::PayoffTable;
use crate::Position;
use crate::ResponseEvent;
use crate::Round;
use crate::Settings;
use crate::VisitEvent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Request to the connection layer: put a bot in place of a dropped
/// participant and resume it at the step in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub replace: ParticipantId,
    pub resume: Position,
    pub strategy: BotStrategy,
}

/// Server-side aggregator of visits, responses and earnings.
///
/// Every mutation is attributed to one round and one event. Fallible
/// mutations compute everything before writing, so an error leaves the
/// ledger exactly as it was.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RoundLedger {
    records: BTreeMap<ParticipantId, Record>,
    #[serde(skip)]
    queued: BTreeMap<(Round, ParticipantId), (ParticipantId, VisitEvent)>,
    #[serde(skip)]
    payoffs: PayoffTable,
    #[serde(skip)]
    penalty: f64,
}

impl From<&Settings> for RoundLedger {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.payoffs.clone(), settings.percent_penalty)
    }
}

impl RoundLedger {
    pub fn new(payoffs: PayoffTable, penalty: f64) -> Self {
        Self {
            records: BTreeMap::new(),
            queued: BTreeMap::new(),
            payoffs,
            penalty,
        }
    }
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }
    pub fn records(&self) -> impl Iterator<Item = (&ParticipantId, &Record)> {
        self.records.iter()
    }
    /// Registers a participant on join. Unknown ids referenced later are
    /// initialized lazily as bots.
    pub fn register(&mut self, id: &str, client_type: ClientType) {
        self.entry(id).client_type = client_type;
    }

    /// Queues `event` for `visitee`, making exactly one response legal.
    pub fn record_visit(
        &mut self,
        round: Round,
        visitee: &str,
        event: &VisitEvent,
    ) -> Result<(), LedgerError> {
        if event.visitor == visitee {
            return Err(LedgerError::SelfVisit(visitee.to_string()));
        }
        let key = (round, event.visitor.clone());
        if self.queued.contains_key(&key) || self.visited(round, &event.visitor) {
            return Err(LedgerError::Revisit {
                round,
                visitor: event.visitor.clone(),
            });
        }
        self.entry(&event.visitor);
        self.entry(visitee);
        self.queued
            .insert(key, (visitee.to_string(), event.clone()));
        Ok(())
    }

    /// Scores a response and books it on both sides.
    ///
    /// The visitor earns `payoff(visit, response)` and the visitee the mirror
    /// `payoff(response, visit)`. A side that timed out instead loses
    /// `floor(penalty × total)` of what it had and counts a timeup. The
    /// consumed visit cannot be answered again.
    pub fn record_response(&mut self, event: &ResponseEvent) -> Result<VisitRecord, LedgerError> {
        let key = (event.round, event.visitor.clone());
        let unqueued = || LedgerError::Unqueued {
            round: event.round,
            visitor: event.visitor.clone(),
        };
        match self.queued.get(&key) {
            Some((visitee, visit))
                if *visitee == event.visitee && visit.strategy == event.visit_strategy => {}
            _ => return Err(unqueued()),
        }
        let pairing = Pairing(event.visit_strategy, event.response_strategy);
        let mut visitor_earning = self.payoffs.get(pairing)?;
        let mut visitee_earning = self.payoffs.get(pairing.mirror())?;
        if event.visitor_timed_out {
            visitor_earning = self.penalize(&event.visitor);
        }
        if event.visitee_timed_out {
            visitee_earning = self.penalize(&event.visitee);
        }
        let record = VisitRecord {
            visitee: event.visitee.clone(),
            visit_strategy: event.visit_strategy,
            response_strategy: event.response_strategy,
            visitor_earning,
            visitee_earning,
            visit_time: event.visit_time,
            respond_time: event.respond_time,
            round: event.round,
            visitor_timed_out: event.visitor_timed_out,
            visitee_timed_out: event.visitee_timed_out,
        };
        self.queued.remove(&key);
        let visitor = self.entry(&event.visitor);
        visitor.visits.push(VisitEntry::Visit(record.clone()));
        visitor.total_earnings += visitor_earning;
        visitor.timeups += event.visitor_timed_out as usize;
        let visitee = self.entry(&event.visitee);
        visitee.total_earnings += visitee_earning;
        visitee.timeups += event.visitee_timed_out as usize;
        log::debug!(
            "[ledger] round {} {}({}) -> {}({}): {} / {}",
            event.round,
            event.visitor,
            event.visit_strategy,
            event.visitee,
            event.response_strategy,
            visitor_earning,
            visitee_earning
        );
        Ok(record)
    }

    pub fn record_order(&mut self, id: &str, order: Vec<ParticipantId>) {
        self.entry(id).orders.push(order);
    }
    pub fn record_interface(&mut self, id: &str, symbols: Vec<String>) {
        self.entry(id).interface = Some(symbols);
    }

    /// Marks the dropout in the visit history and asks for a NAIVE stand-in.
    /// Reconnection itself is the connection layer's business.
    pub fn on_disconnect(&mut self, id: &str, at: Position) -> Substitution {
        self.entry(id)
            .visits
            .push(VisitEntry::Dropout { round: at.round });
        log::info!("[ledger] {} dropped out during {}", id, at);
        Substitution {
            replace: id.to_string(),
            resume: at,
            strategy: BotStrategy::Naive,
        }
    }

    /// Visits still waiting for `visitee`'s response in `round`.
    pub fn pending(&self, round: Round, visitee: &str) -> Vec<VisitEvent> {
        self.queued
            .iter()
            .filter(|((r, _), (to, _))| *r == round && to == visitee)
            .map(|(_, (_, visit))| visit.clone())
            .collect()
    }
    /// Drops unanswered visits of `round`; they are never scored.
    pub fn expire(&mut self, round: Round) -> Vec<(ParticipantId, ParticipantId)> {
        let expired = self
            .queued
            .iter()
            .filter(|((r, _), _)| *r == round)
            .map(|((_, from), (to, _))| (from.clone(), to.clone()))
            .collect::<Vec<_>>();
        self.queued.retain(|(r, _), _| *r != round);
        expired
    }

    /// Grants `basepay` once to everyone with fewer than `threshold` timeups.
    /// Returns who received it this call.
    pub fn compute_base_pay(&mut self, threshold: f64, basepay: Earnings) -> Vec<ParticipantId> {
        self.records
            .iter_mut()
            .filter(|(_, r)| r.basepay == 0)
            .filter(|(_, r)| (r.timeups as f64) < threshold)
            .map(|(id, r)| {
                r.basepay = basepay;
                r.total_earnings += basepay;
                id.clone()
            })
            .collect()
    }

    /// Latest visit earning and running total for everyone who has visited.
    pub fn broadcast_player_earnings(&self) -> Vec<(ParticipantId, EarningsUpdate)> {
        self.records
            .iter()
            .filter_map(|(id, r)| {
                r.last_visit().map(|v| {
                    let update = EarningsUpdate {
                        round: v.round,
                        last_round: v.visitor_earning,
                        total: r.total_earnings,
                    };
                    (id.clone(), update)
                })
            })
            .collect()
    }

    /// Recomputes `id`'s total from the recorded visits of every participant
    /// plus base pay. Equal to `total_earnings` for a consistent ledger.
    pub fn audit(&self, id: &str) -> Earnings {
        let as_visitor = self
            .records
            .get(id)
            .map(|r| {
                r.visits
                    .iter()
                    .filter_map(VisitEntry::visit)
                    .map(|v| v.visitor_earning)
                    .sum::<Earnings>()
            })
            .unwrap_or(0);
        let as_visitee = self
            .records
            .values()
            .flat_map(|r| r.visits.iter().filter_map(VisitEntry::visit))
            .filter(|v| v.visitee == id)
            .map(|v| v.visitee_earning)
            .sum::<Earnings>();
        let basepay = self.records.get(id).map(|r| r.basepay).unwrap_or(0);
        as_visitor + as_visitee + basepay
    }
    pub fn to_json(&self) -> String {
        // string keys and plain data only
        serde_json::to_string_pretty(self).expect("serialize ledger")
    }

    fn penalize(&self, id: &str) -> Earnings {
        let total = self.records.get(id).map(|r| r.total_earnings).unwrap_or(0);
        (total as f64 * -self.penalty).floor() as Earnings
    }
    fn visited(&self, round: Round, visitor: &str) -> bool {
        self.records
            .get(visitor)
            .map(|r| {
                r.visits
                    .iter()
                    .filter_map(VisitEntry::visit)
                    .any(|v| v.round == round)
            })
            .unwrap_or(false)
    }
    fn entry(&mut self, id: &str) -> &mut Record {
        self.records
            .entry(id.to_string())
            .or_insert_with(|| Record::new(ClientType::Bot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Step;
    use crate::Strategy::*;

    fn ledger() -> RoundLedger {
        RoundLedger::new(PayoffTable::default(), 0.1)
    }
    fn visit(visitor: &str, strategy: crate::Strategy, timed_out: bool) -> VisitEvent {
        VisitEvent::new(visitor.into(), strategy, 1200, timed_out)
    }
    fn respond(
        ledger: &mut RoundLedger,
        round: Round,
        visit: &VisitEvent,
        visitee: &str,
        strategy: crate::Strategy,
        timed_out: bool,
    ) -> Result<VisitRecord, LedgerError> {
        let event = ResponseEvent::answer(visit, visitee.into(), strategy, 900, round, timed_out);
        ledger.record_response(&event)
    }

    #[test]
    fn hawk_meets_dove() {
        let mut ledger = ledger();
        let v = visit("a", Hawk, false);
        ledger.record_visit(1, "b", &v).unwrap();
        let record = respond(&mut ledger, 1, &v, "b", Dove, false).unwrap();
        assert_eq!(record.visitor_earning, 100);
        assert_eq!(record.visitee_earning, 20);
        assert_eq!(ledger.record("a").unwrap().total_earnings, 100);
        assert_eq!(ledger.record("b").unwrap().total_earnings, 20);
        assert_eq!(ledger.record("a").unwrap().visits.len(), 1);
        assert!(ledger.record("b").unwrap().visits.is_empty());
    }
    #[test]
    fn replayed_response_is_rejected() {
        let mut ledger = ledger();
        let v = visit("a", Dove, false);
        ledger.record_visit(1, "b", &v).unwrap();
        respond(&mut ledger, 1, &v, "b", Dove, false).unwrap();
        let before = ledger.clone();
        assert_eq!(
            respond(&mut ledger, 1, &v, "b", Dove, false),
            Err(LedgerError::Unqueued {
                round: 1,
                visitor: "a".into()
            })
        );
        assert_eq!(ledger.record("a"), before.record("a"));
        assert_eq!(ledger.record("a").unwrap().total_earnings, 60);
        assert_eq!(ledger.record("b").unwrap().total_earnings, 60);
    }
    #[test]
    fn response_needs_matching_visit() {
        let mut ledger = ledger();
        let v = visit("a", Hawk, false);
        assert!(respond(&mut ledger, 1, &v, "b", Dove, false).is_err());
        ledger.record_visit(1, "b", &v).unwrap();
        assert!(respond(&mut ledger, 1, &v, "c", Dove, false).is_err());
        assert!(respond(&mut ledger, 2, &v, "b", Dove, false).is_err());
        let lying = visit("a", Dove, false);
        assert!(respond(&mut ledger, 1, &lying, "b", Dove, false).is_err());
        assert_eq!(ledger.record("b").unwrap().total_earnings, 0);
    }
    #[test]
    fn one_visit_per_round() {
        let mut ledger = ledger();
        ledger.record_visit(1, "b", &visit("a", Hawk, false)).unwrap();
        assert!(matches!(
            ledger.record_visit(1, "c", &visit("a", Hawk, false)),
            Err(LedgerError::Revisit { .. })
        ));
        assert_eq!(
            ledger.record_visit(1, "a", &visit("a", Hawk, false)),
            Err(LedgerError::SelfVisit("a".into()))
        );
        assert!(ledger.record_visit(2, "c", &visit("a", Hawk, false)).is_ok());
    }
    #[test]
    fn timed_out_visitor_is_penalized() {
        let mut ledger = ledger();
        // bring "a" to 200 through two Hawk-on-Dove rounds
        for round in 1..=2 {
            let v = visit("a", Hawk, false);
            ledger.record_visit(round, "b", &v).unwrap();
            respond(&mut ledger, round, &v, "b", Dove, false).unwrap();
        }
        assert_eq!(ledger.record("a").unwrap().total_earnings, 200);
        let v = visit("a", Hawk, true);
        ledger.record_visit(3, "b", &v).unwrap();
        let record = respond(&mut ledger, 3, &v, "b", Dove, false).unwrap();
        assert_eq!(record.visitor_earning, -20);
        assert_eq!(record.visitee_earning, 20);
        let a = ledger.record("a").unwrap();
        assert_eq!(a.total_earnings, 180);
        assert_eq!(a.timeups, 1);
        assert_eq!(ledger.record("b").unwrap().timeups, 0);
    }
    #[test]
    fn timed_out_visitee_is_penalized() {
        let mut ledger = ledger();
        let v = visit("b", Hawk, false);
        ledger.record_visit(1, "a", &v).unwrap();
        respond(&mut ledger, 1, &v, "a", Dove, false).unwrap();
        assert_eq!(ledger.record("a").unwrap().total_earnings, 20);
        let v = visit("b", Dove, false);
        ledger.record_visit(2, "a", &v).unwrap();
        let record = respond(&mut ledger, 2, &v, "a", Hawk, true).unwrap();
        assert_eq!(record.visitee_earning, -2);
        assert_eq!(record.visitor_earning, 20);
        assert_eq!(ledger.record("a").unwrap().timeups, 1);
        assert_eq!(ledger.record("a").unwrap().total_earnings, 18);
    }
    #[test]
    fn missing_payoff_leaves_ledger_unchanged() {
        let table = PayoffTable::from([(Pairing(Hawk, Hawk), 0), (Pairing(Hawk, Dove), 100)]);
        let mut ledger = RoundLedger::new(table, 0.1);
        let v = visit("a", Hawk, false);
        ledger.record_visit(1, "b", &v).unwrap();
        assert!(matches!(
            respond(&mut ledger, 1, &v, "b", Dove, false),
            Err(LedgerError::Payoff(_))
        ));
        assert_eq!(ledger.record("a").unwrap().total_earnings, 0);
        assert_eq!(ledger.pending(1, "b"), vec![v]);
    }
    #[test]
    fn dropout_marker_and_substitution() {
        let mut ledger = ledger();
        ledger.register("h", ClientType::Human);
        let at = Position::new(Step::Respond, 2);
        let substitution = ledger.on_disconnect("h", at);
        assert_eq!(substitution.replace, "h");
        assert_eq!(substitution.resume, at);
        assert_eq!(substitution.strategy, BotStrategy::Naive);
        let record = ledger.record("h").unwrap();
        assert_eq!(record.visits, vec![VisitEntry::Dropout { round: 2 }]);
        assert_eq!(record.client_type, ClientType::Human);
        assert!(record.dropped());
    }
    #[test]
    fn base_pay_is_strict_and_once() {
        let mut ledger = ledger();
        ledger.register("one", ClientType::Human);
        ledger.register("two", ClientType::Human);
        ledger.records.get_mut("one").unwrap().timeups = 1;
        ledger.records.get_mut("two").unwrap().timeups = 2;
        let paid = ledger.compute_base_pay(1.5, 100);
        assert_eq!(paid, vec!["one".to_string()]);
        assert!(ledger.compute_base_pay(1.5, 100).is_empty());
        assert_eq!(ledger.record("one").unwrap().total_earnings, 100);
        assert_eq!(ledger.record("two").unwrap().total_earnings, 0);
        assert_eq!(ledger.audit("one"), 100);
    }
    #[test]
    fn earnings_broadcast_covers_visitors_only() {
        let mut ledger = ledger();
        let v = visit("a", Dove, false);
        ledger.record_visit(1, "b", &v).unwrap();
        respond(&mut ledger, 1, &v, "b", Hawk, false).unwrap();
        ledger.on_disconnect("a", Position::new(Step::Visit, 2));
        let updates = ledger.broadcast_player_earnings();
        assert_eq!(
            updates,
            vec![(
                "a".to_string(),
                EarningsUpdate {
                    round: 1,
                    last_round: 20,
                    total: 20
                }
            )]
        );
    }
    #[test]
    fn expired_visits_are_never_scored() {
        let mut ledger = ledger();
        let v = visit("a", Hawk, false);
        ledger.record_visit(1, "naive", &v).unwrap();
        assert_eq!(ledger.pending(1, "naive").len(), 1);
        assert_eq!(
            ledger.expire(1),
            vec![("a".to_string(), "naive".to_string())]
        );
        assert!(ledger.pending(1, "naive").is_empty());
        assert!(respond(&mut ledger, 1, &v, "naive", Dove, false).is_err());
        assert_eq!(ledger.record("a").unwrap().total_earnings, 0);
    }
    #[test]
    fn totals_are_auditable() {
        let mut ledger = ledger();
        let pairs = [("a", "b", Hawk, Dove), ("b", "c", Dove, Dove), ("c", "a", Hawk, Hawk)];
        for round in 1..=3 {
            for (from, to, vs, rs) in pairs {
                let v = visit(from, vs, round == 2 && from == "b");
                ledger.record_visit(round, to, &v).unwrap();
                respond(&mut ledger, round, &v, to, rs, false).unwrap();
            }
        }
        ledger.compute_base_pay(1.5, 100);
        for (id, record) in ledger.records() {
            assert_eq!(ledger.audit(id), record.total_earnings, "{}", id);
        }
    }
    #[test]
    fn dump_is_keyed_by_participant() {
        let mut ledger = ledger();
        let v = visit("a", Hawk, false);
        ledger.record_visit(1, "b", &v).unwrap();
        respond(&mut ledger, 1, &v, "b", Dove, false).unwrap();
        ledger.on_disconnect("b", Position::new(Step::Visit, 2));
        let json = serde_json::from_str::<serde_json::Value>(&ledger.to_json()).unwrap();
        assert_eq!(json["a"]["totalEarnings"], 100);
        assert_eq!(json["a"]["visits"][0]["visitee"], "b");
        assert_eq!(json["b"]["visits"][0]["DROPOUT"], 2);
        assert_eq!(json["b"]["clientType"], "bot");
    }
}
