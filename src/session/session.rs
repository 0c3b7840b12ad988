use super::*;
use crate::Actor;
use crate::Archive;
use crate::Barrier;
use crate::Bot;
use crate::BotPolicy;
use crate::ClientType;
use crate::ConfigError;
use crate::Envelope;
use crate::Event;
use crate::Message;
use crate::MessageError;
use crate::Participant;
use crate::ParticipantId;
use crate::Plan;
use crate::Position;
use crate::ResponseEvent;
use crate::Round;
use crate::RoundLedger;
use crate::Sequencer;
use crate::Settings;
use crate::Step;
use crate::StepRule;
use crate::Strategy;
use crate::VisitEvent;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

/// What woke the session up.
enum Inbound {
    Expired,
    Closed,
    Envelope(Envelope),
}

impl From<Option<Envelope>> for Inbound {
    fn from(envelope: Option<Envelope>) -> Self {
        envelope.map(Self::Envelope).unwrap_or(Self::Closed)
    }
}

/// Central coordinator of one experiment session.
/// Owns the ledger and the sequencer; participants only ever reach it
/// through stamped envelopes on a single queue, so every mutation of
/// shared state happens here, one message at a time.
///
/// The session walks the plan one stretch at a time:
/// - Wait step: everyone gets the step, nobody advances until all are done
///   or the step's timer forces decisions for whoever is left
/// - Solo stretch: each participant walks the consecutive solo steps at its
///   own pace; the stretch ends when the last one finishes
///
/// A participant that disconnects is replaced in place by a NAIVE bot.
pub struct Session {
    settings: Settings,
    ledger: RoundLedger,
    sequencer: Sequencer,
    roster: Roster,
    channel: Channel<Envelope>,
    timer: Timer,
    archive: Option<Archive>,
    rng: SmallRng,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            ledger: RoundLedger::from(&settings),
            sequencer: Sequencer::new(&Plan::from(&settings)),
            roster: Roster::default(),
            channel: Channel::default(),
            timer: Timer::default(),
            archive: None,
            rng: SmallRng::seed_from_u64(seed),
            settings,
        })
    }
    pub fn with_archive(mut self, archive: Archive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Spawns `player` in its own task and admits it under `id`.
    pub fn sit<P>(&mut self, id: &str, player: P, client_type: ClientType)
    where
        P: Participant + 'static,
    {
        if self.roster.contains(id) {
            log::warn!("[session] {} is already seated", id);
            return;
        }
        let inbox = Actor::spawn(id.to_string(), Box::new(player), self.channel.sender());
        self.roster.sit(id, inbox, client_type);
        self.ledger.register(id, client_type);
        log::info!("[session] {} joined as {:?}", id, client_type);
    }
    /// Inbound queue for participants not run by an [`Actor`].
    pub fn sender(&self) -> UnboundedSender<Envelope> {
        self.channel.sender()
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    /// Runs the plan to the end and hands back the final ledger.
    pub async fn run(mut self) -> RoundLedger {
        log::info!(
            "[session {}] starting with {} participants",
            self.settings.nodename(),
            self.roster.len()
        );
        while !self.sequencer.is_over() {
            let stretch = self.sequencer.next_stretch();
            match stretch.first().copied() {
                None => break,
                Some(at) if at.rule() == StepRule::Wait => self.wait(at).await,
                Some(_) => self.solo(&stretch).await,
            }
        }
        self.roster.broadcast(Event::Gameover);
        log::info!("[session {}] game over", self.settings.nodename());
        self.ledger
    }
}

/// Stepping.
impl Session {
    async fn wait(&mut self, at: Position) {
        self.enter(at);
        let mut barrier = Barrier::new(self.roster.ids());
        self.timer.start(self.settings.timeout(at.step.name()));
        for id in self.roster.ids() {
            self.prompt(&id, at);
        }
        while !barrier.complete() {
            match self.next().await {
                Inbound::Expired => self.timeup(at, &mut barrier),
                Inbound::Closed => {
                    log::warn!("[session] inbound queue closed during {}", at);
                    break;
                }
                Inbound::Envelope(envelope) => {
                    if let Err(e) = self.handle(at, &mut barrier, envelope) {
                        log::warn!("[session] rejected during {}: {}", at, e);
                    }
                }
            }
        }
        self.timer.clear();
        self.exit(at);
    }

    async fn solo(&mut self, stretch: &[Position]) {
        let mut cursors = self
            .roster
            .ids()
            .into_iter()
            .map(|id| (id, 0))
            .collect::<BTreeMap<ParticipantId, usize>>();
        let mut barrier = Barrier::new(self.roster.ids());
        self.timer.clear();
        for id in self.roster.ids() {
            self.prompt(&id, stretch[0]);
        }
        while !barrier.complete() {
            match self.next().await {
                Inbound::Expired => self.timer.clear(),
                Inbound::Closed => {
                    log::warn!("[session] inbound queue closed during {}", stretch[0]);
                    break;
                }
                Inbound::Envelope(envelope) => {
                    if let Err(e) = self.walk(stretch, &mut cursors, &mut barrier, envelope) {
                        log::warn!("[session] rejected during solo steps: {}", e);
                    }
                }
            }
        }
    }

    async fn next(&mut self) -> Inbound {
        if self.timer.expired() {
            return Inbound::Expired;
        }
        match self.timer.deadline() {
            Some(deadline) => tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => Inbound::Expired,
                envelope = self.channel.rx().recv() => Inbound::from(envelope),
            },
            None => Inbound::from(self.channel.rx().recv().await),
        }
    }

    fn prompt(&self, id: &str, at: Position) {
        let roster = self.roster.others(id);
        self.roster.unicast(id, Event::Step { at, roster });
    }

    fn enter(&mut self, at: Position) {
        log::debug!("[session] entering {}", at);
        match at.step {
            Step::Visit if at.round > 1 => {
                for (id, update) in self.ledger.broadcast_player_earnings() {
                    self.roster.unicast(&id, Event::Earnings(update));
                }
            }
            Step::Respond => self
                .roster
                .broadcast(Event::Payoffs(self.settings.payoffs.clone())),
            Step::EndSurvey => self.dump(),
            Step::Payoffs => {
                let granted = self.ledger.compute_base_pay(
                    self.settings.basepay_threshold(),
                    self.settings.basepay,
                );
                log::info!("[session] base pay granted to {} participants", granted.len());
                for (id, record) in self.ledger.records() {
                    let total = record.total_earnings;
                    let basepay = record.basepay;
                    self.roster.unicast(id, Event::Payout { total, basepay });
                }
                self.dump();
            }
            _ => {}
        }
    }

    fn exit(&mut self, at: Position) {
        if at.step == Step::Respond {
            for (visitor, visitee) in self.ledger.expire(at.round) {
                log::debug!("[session] visit {} -> {} went unanswered", visitor, visitee);
            }
        }
    }

    fn dump(&self) {
        if let Some(ref archive) = self.archive {
            archive.dump(&self.ledger);
        }
    }
}

/// Inbound messages.
impl Session {
    fn handle(
        &mut self,
        at: Position,
        barrier: &mut Barrier,
        envelope: Envelope,
    ) -> anyhow::Result<()> {
        let Envelope {
            from,
            at: stamp,
            message,
        } = envelope;
        if !self.roster.contains(&from) {
            return Err(anyhow::anyhow!("unknown sender {}", from));
        }
        if matches!(message, Message::Disconnect) {
            let pending = !barrier.is_done(&from);
            self.substitute(&from, at, pending);
            return Ok(());
        }
        if stamp != at {
            log::debug!("[session] ignoring stale {} message from {}", stamp, from);
            return Ok(());
        }
        if barrier.is_done(&from) {
            log::debug!("[session] ignoring late message from {} during {}", from, at);
            return Ok(());
        }
        match message {
            Message::Visit(decision) if at.step == Step::Visit => {
                if decision.visitee == from {
                    return Err(MessageError::SelfVisit(from).into());
                }
                if !self.roster.contains(&decision.visitee) {
                    return Err(MessageError::UnknownTarget(decision.visitee).into());
                }
                let visit = VisitEvent::new(
                    from.clone(),
                    decision.strategy,
                    decision.decision_time,
                    decision.timeup,
                );
                self.ledger.record_visit(at.round, &decision.visitee, &visit)?;
                self.roster.unicast(&decision.visitee, Event::Visited(visit));
                barrier.done(&from);
            }
            Message::Response(response) if at.step == Step::Respond => {
                if response.visitee != from {
                    return Err(MessageError::Impersonation(response.visitee).into());
                }
                if response.round != at.round {
                    return Err(MessageError::OutOfStep(at).into());
                }
                self.ledger.record_response(&response)?;
            }
            Message::Done => {
                barrier.done(&from);
            }
            message => self.accept(&from, at, message)?,
        }
        Ok(())
    }

    fn walk(
        &mut self,
        stretch: &[Position],
        cursors: &mut BTreeMap<ParticipantId, usize>,
        barrier: &mut Barrier,
        envelope: Envelope,
    ) -> anyhow::Result<()> {
        let Envelope {
            from,
            at: stamp,
            message,
        } = envelope;
        let cursor = cursors
            .get(&from)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown sender {}", from))?;
        let current = stretch.get(cursor).copied();
        match (message, current) {
            (Message::Disconnect, current) => {
                let resume = current.unwrap_or(stamp);
                self.substitute(&from, resume, current.is_some());
            }
            (_, None) => {
                log::debug!("[session] ignoring late message from {}", from);
            }
            (_, Some(current)) if stamp != current => {
                log::debug!("[session] ignoring stale {} message from {}", stamp, from);
            }
            (Message::Done, Some(_)) => {
                cursors.insert(from.clone(), cursor + 1);
                match stretch.get(cursor + 1).copied() {
                    Some(next) => self.prompt(&from, next),
                    None => {
                        barrier.done(&from);
                    }
                }
            }
            (message, Some(current)) => self.accept(&from, current, message)?,
        }
        Ok(())
    }

    /// Submissions that never complete a step.
    fn accept(&mut self, from: &str, at: Position, message: Message) -> Result<(), MessageError> {
        match message {
            Message::Order(order) if at.step == Step::Respond => {
                self.ledger.record_order(from, order.visitors);
            }
            Message::Interface(interface) if at.step == Step::Precache => {
                self.ledger.record_interface(from, interface.symbols);
            }
            Message::Survey(survey) if at.step == Step::EndSurvey => match self.archive {
                Some(ref archive) => archive.save_survey(&from.to_string(), &survey),
                None => log::debug!("[session] no archive for survey of {}", from),
            },
            _ => return Err(MessageError::OutOfStep(at)),
        }
        Ok(())
    }
}

/// Recovery.
impl Session {
    /// Forces a decision for everyone still pending when the step times out.
    fn timeup(&mut self, at: Position, barrier: &mut Barrier) {
        let elapsed = self
            .settings
            .timeout(at.step.name())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        for id in barrier.pending() {
            log::info!("[session] {} timed out during {}", id, at);
            match at.step {
                Step::Visit => self.force_visit(at.round, &id, elapsed),
                Step::Respond => self.force_responses(at.round, &id, elapsed),
                _ => {}
            }
            barrier.done(&id);
            self.roster.unicast(&id, Event::Timeup { at });
        }
        self.timer.clear();
    }

    fn force_visit(&mut self, round: Round, id: &ParticipantId, elapsed: u64) {
        let others = self.roster.others(id);
        let Some(visitee) = others.choose(&mut self.rng).cloned() else {
            return;
        };
        let visit = VisitEvent::new(id.clone(), Strategy::random(&mut self.rng), elapsed, true);
        match self.ledger.record_visit(round, &visitee, &visit) {
            Ok(()) => self.roster.unicast(&visitee, Event::Visited(visit)),
            Err(e) => log::warn!("[session] forced visit of {} failed: {}", id, e),
        }
    }

    fn force_responses(&mut self, round: Round, id: &ParticipantId, elapsed: u64) {
        for visit in self.ledger.pending(round, id) {
            let strategy = Strategy::random(&mut self.rng);
            let response = ResponseEvent::answer(&visit, id.clone(), strategy, elapsed, round, true);
            if let Err(e) = self.ledger.record_response(&response) {
                log::warn!("[session] forced response of {} failed: {}", id, e);
            }
        }
    }

    /// Puts a NAIVE bot in the seat of a participant that went away.
    fn substitute(&mut self, id: &str, at: Position, pending: bool) {
        let substitution = self.ledger.on_disconnect(id, at);
        let replaced = self.roster.client_type(id);
        let policy = BotPolicy::with_mode(
            substitution.replace.clone(),
            &self.settings,
            substitution.strategy,
        );
        let bot = Bot::new(policy, self.rng.random());
        let inbox = Actor::spawn(substitution.replace.clone(), Box::new(bot), self.channel.sender());
        self.roster.replace(id, inbox, ClientType::Bot);
        self.roster.broadcast_except(
            id,
            Event::Dropout {
                id: substitution.replace.clone(),
            },
        );
        log::info!(
            "[session] {} ({:?}) replaced by a {} bot",
            id,
            replaced,
            substitution.strategy
        );
        if pending {
            self.prompt(id, substitution.resume);
        }
    }
}
