use super::*;
use crate::Event;
use crate::InterfaceSubmission;
use crate::Message;
use crate::OrderSubmission;
use crate::ParticipantId;
use crate::Position;
use crate::ResponseEvent;
use crate::Step;
use crate::Strategy;
use crate::SurveySubmission;
use crate::VisitDecision;
use crate::VisitQueue;
use dialoguer::Input;
use dialoguer::Select;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::time::Instant;

const SYMBOLS: [&str; 6] = ["@", "#", "$", "%", "^", "&"];

/// Terminal participant. Other participants are shown as shuffled symbols
/// rather than ids, and the symbol assignment is reported once at precache.
pub struct Human {
    id: ParticipantId,
    alive: bool,
    queue: VisitQueue,
    symbols: BTreeMap<ParticipantId, String>,
    rng: SmallRng,
}

impl Human {
    pub fn new(id: ParticipantId, seed: u64) -> Self {
        Self {
            id,
            alive: true,
            queue: VisitQueue::default(),
            symbols: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    fn label(&self, id: &str) -> String {
        self.symbols.get(id).cloned().unwrap_or_else(|| id.to_string())
    }
    fn assign(&mut self, roster: &[ParticipantId]) -> Vec<Message> {
        let mut symbols = SYMBOLS.to_vec();
        symbols.shuffle(&mut self.rng);
        self.symbols = roster
            .iter()
            .zip(symbols)
            .map(|(id, symbol)| (id.clone(), symbol.to_string()))
            .collect();
        let symbols = roster.iter().map(|id| self.label(id)).collect();
        vec![
            Message::Interface(InterfaceSubmission { symbols }),
            Message::Done,
        ]
    }
    fn strategy(&mut self, prompt: &str) -> Option<Strategy> {
        self.select(prompt, &["Hawk (H)", "Dove (D)"])
            .map(Strategy::from)
    }
    fn select(&mut self, prompt: &str, items: &[&str]) -> Option<usize> {
        match Select::new()
            .with_prompt(prompt)
            .report(false)
            .items(items)
            .default(0)
            .interact()
        {
            Ok(choice) => Some(choice),
            Err(e) => {
                log::warn!("[human {}] input closed: {}", self.id, e);
                self.alive = false;
                None
            }
        }
    }
    fn visit(&mut self, roster: &[ParticipantId]) -> Vec<Message> {
        let start = Instant::now();
        let labels = roster.iter().map(|id| self.label(id)).collect::<Vec<_>>();
        let items = labels.iter().map(String::as_str).collect::<Vec<_>>();
        let Some(target) = self.select("Whom do you visit?", &items) else {
            return vec![];
        };
        let Some(strategy) = self.strategy("How do you approach them?") else {
            return vec![];
        };
        vec![Message::Visit(VisitDecision {
            visitee: roster[target].clone(),
            strategy,
            decision_time: start.elapsed().as_millis() as u64,
            timeup: false,
        })]
    }
    fn respond(&mut self, at: &Position) -> Vec<Message> {
        self.queue.shuffle(&mut self.rng);
        let visits = self.queue.drain_all();
        if visits.is_empty() {
            println!("No visitors.");
        }
        let order = OrderSubmission {
            visitors: visits.iter().map(|v| v.visitor.clone()).collect(),
        };
        let mut messages = vec![Message::Order(order)];
        for visit in visits.iter() {
            let start = Instant::now();
            let prompt = format!("{} visited you. Your answer?", self.label(&visit.visitor));
            let Some(strategy) = self.strategy(&prompt) else {
                return messages;
            };
            messages.push(Message::Response(ResponseEvent::answer(
                visit,
                self.id.clone(),
                strategy,
                start.elapsed().as_millis() as u64,
                at.round,
                false,
            )));
        }
        messages.push(Message::Done);
        messages
    }
    fn survey(&mut self) -> Vec<Message> {
        match Input::<String>::new()
            .with_prompt("Any comments on how you played?")
            .allow_empty(true)
            .interact_text()
        {
            Ok(text) => vec![
                Message::Survey(SurveySubmission {
                    answers: serde_json::json!({ "comments": text }),
                }),
                Message::Done,
            ],
            Err(e) => {
                log::warn!("[human {}] input closed: {}", self.id, e);
                self.alive = false;
                vec![]
            }
        }
    }
}

#[async_trait::async_trait]
impl Participant for Human {
    fn alive(&self) -> bool {
        self.alive
    }
    async fn decide(&mut self, at: &Position, roster: &[ParticipantId]) -> Vec<Message> {
        match at.step {
            Step::Precache => self.assign(roster),
            Step::Welcome => {
                println!("Welcome to the visiting game.");
                vec![Message::Done]
            }
            Step::Instructions => {
                println!("Each round you visit someone as Hawk or Dove, then answer your visitors.");
                vec![Message::Done]
            }
            Step::Practice => vec![Message::Done],
            Step::Visit => {
                println!("Round {}", at.round);
                self.visit(roster)
            }
            Step::Respond => self.respond(at),
            Step::EndSurvey => self.survey(),
            Step::Payoffs => vec![Message::Done],
        }
    }
    async fn notify(&mut self, event: &Event) {
        match event {
            Event::Visited(visit) => self.queue.enqueue(visit.clone()),
            Event::Earnings(update) => println!(
                "Last round you earned {} (total {})",
                update.last_round, update.total
            ),
            Event::Timeup { at } => println!("Time is up for {}; a choice was made for you", at),
            Event::Dropout { id } => println!("{} left the game", self.label(id)),
            Event::Payout { total, basepay } => {
                println!("You earned {} in total, including {} base pay", total, basepay)
            }
            Event::Gameover => println!("Game over."),
            Event::Payoffs(table) => log::debug!("[human {}] payoffs {}", self.id, table),
            Event::Step { .. } => {}
        }
    }
}
