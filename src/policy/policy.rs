use super::*;
use crate::BotStrategy;
use crate::EarningsUpdate;
use crate::Event;
use crate::HostWeights;
use crate::Message;
use crate::OrderSubmission;
use crate::ParticipantId;
use crate::PayoffTable;
use crate::Position;
use crate::ResponseEvent;
use crate::Round;
use crate::Settings;
use crate::Step;
use crate::Strategy;
use crate::VisitDecision;
use crate::VisitEvent;
use crate::VisitQueue;
use crate::Weight;
use crate::Weights;
use rand::Rng;

/// Decision logic of one bot, as a pure function of (state, event).
///
/// A NAIVE bot completes every step immediately and never visits or
/// answers. A REINFORCEMENT bot samples its target from host weights and
/// its strategies from visit/respond weights, then feeds realized payoffs
/// back into those weights.
#[derive(Debug, Clone)]
pub struct BotPolicy {
    id: ParticipantId,
    mode: BotStrategy,
    phase: Phase,
    visit: Weights,
    respond: Weights,
    hosts: HostWeights,
    queue: VisitQueue,
    payoffs: PayoffTable,
    last: Option<(Round, Strategy)>,
}

impl BotPolicy {
    /// A bot deciding the way the session settings say.
    pub fn new(id: ParticipantId, settings: &Settings) -> Self {
        Self::with_mode(id, settings, settings.bot_strategy)
    }
    pub fn with_mode(id: ParticipantId, settings: &Settings, mode: BotStrategy) -> Self {
        let weights = settings.bot_weights;
        Self {
            id,
            mode,
            phase: Phase::Idle,
            visit: weights.visit,
            respond: weights.respond,
            hosts: HostWeights::new(weights.host_weight),
            queue: VisitQueue::default(),
            payoffs: settings.payoffs.clone(),
            last: None,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn mode(&self) -> BotStrategy {
        self.mode
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn visit_weights(&self) -> Weights {
        self.visit
    }
    pub fn respond_weights(&self) -> Weights {
        self.respond
    }
    pub fn queue(&self) -> &VisitQueue {
        &self.queue
    }

    /// Handles one event and returns the messages to send back.
    pub fn react<R: Rng + ?Sized>(&mut self, event: &Event, rng: &mut R) -> Vec<Message> {
        match event {
            Event::Step { at, roster } => self.enter(at, roster, rng),
            Event::Visited(visit) => {
                self.receive(visit.clone());
                vec![]
            }
            Event::Payoffs(table) => {
                self.payoffs = table.clone();
                vec![]
            }
            Event::Earnings(update) => {
                self.reinforce(update);
                vec![]
            }
            Event::Gameover => {
                self.phase = Phase::Done;
                vec![]
            }
            Event::Timeup { .. } | Event::Dropout { .. } | Event::Payout { .. } => vec![],
        }
    }

    /// Entry callback of a step.
    pub fn enter<R: Rng + ?Sized>(
        &mut self,
        at: &Position,
        roster: &[ParticipantId],
        rng: &mut R,
    ) -> Vec<Message> {
        match (self.mode, at.step) {
            (BotStrategy::Naive, Step::Respond) => {
                self.queue.clear();
                vec![Message::Done]
            }
            (BotStrategy::Naive, _) => vec![Message::Done],
            (BotStrategy::Reinforcement, Step::Visit) => self.visit(at.round, roster, rng),
            (BotStrategy::Reinforcement, Step::Respond) => self.respond(at.round, rng),
            (BotStrategy::Reinforcement, _) => vec![Message::Done],
        }
    }

    fn receive(&mut self, visit: VisitEvent) {
        if self.mode == BotStrategy::Reinforcement {
            self.queue.enqueue(visit);
            self.phase = Phase::AwaitingResponseDecisions;
        }
    }

    /// Chooses a host, then independently a strategy.
    fn visit<R: Rng + ?Sized>(
        &mut self,
        round: Round,
        roster: &[ParticipantId],
        rng: &mut R,
    ) -> Vec<Message> {
        let host = self.hosts.sample(roster, rng).cloned();
        let strategy = self.visit.sample(rng);
        match host {
            Some(visitee) => {
                self.last = Some((round, strategy));
                vec![Message::Visit(VisitDecision {
                    visitee,
                    strategy,
                    decision_time: 0,
                    timeup: false,
                })]
            }
            None => {
                log::debug!("[bot {}] nobody to visit", self.id);
                vec![Message::Done]
            }
        }
    }

    /// Answers queued visits in shuffled order, reporting that order first.
    fn respond<R: Rng + ?Sized>(&mut self, round: Round, rng: &mut R) -> Vec<Message> {
        self.queue.shuffle(rng);
        let visits = self.queue.drain_all();
        let order = OrderSubmission {
            visitors: visits.iter().map(|v| v.visitor.clone()).collect(),
        };
        let mut messages = vec![Message::Order(order)];
        for visit in visits.iter() {
            let strategy = self.respond.sample(rng);
            messages.push(Message::Response(ResponseEvent::answer(
                visit,
                self.id.clone(),
                strategy,
                0,
                round,
                false,
            )));
            match self.payoffs.payoff(strategy, visit.strategy) {
                Ok(payoff) => self.respond.update(strategy, payoff as Weight),
                Err(e) => log::warn!("[bot {}] {}", self.id, e),
            }
        }
        messages.push(Message::Done);
        self.phase = Phase::Idle;
        messages
    }

    /// Credits last round's visit earning to the strategy that earned it.
    fn reinforce(&mut self, update: &EarningsUpdate) {
        match self.last {
            Some((round, strategy)) if round == update.round => {
                self.visit.update(strategy, update.last_round as Weight);
                self.last = None;
            }
            _ => log::trace!("[bot {}] stale earnings for round {}", self.id, update.round),
        }
    }
}
