use super::*;
use crate::Earnings;
use crate::ParticipantId;
use crate::PayoffTable;
use crate::Position;
use serde::Deserialize;
use serde::Serialize;

/// Everything the session tells a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A step begins for the recipient; `roster` lists everyone else.
    Step {
        at: Position,
        roster: Vec<ParticipantId>,
    },
    /// Someone visited the recipient this round.
    Visited(VisitEvent),
    Payoffs(PayoffTable),
    Earnings(EarningsUpdate),
    /// The recipient ran out of time; a default decision was substituted.
    Timeup { at: Position },
    Dropout { id: ParticipantId },
    /// Final earnings after base pay.
    Payout { total: Earnings, basepay: Earnings },
    Gameover,
}

impl Event {
    pub fn to_json(&self) -> String {
        // string keys and plain data only
        serde_json::to_string(self).expect("serialize event")
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Step { at, roster } => write!(f, "step {} ({} others)", at, roster.len()),
            Self::Visited(v) => write!(f, "visited by {} with {}", v.visitor, v.strategy),
            Self::Payoffs(table) => write!(f, "payoffs {}", table),
            Self::Earnings(e) => write!(f, "earned {} (total {})", e.last_round, e.total),
            Self::Timeup { at } => write!(f, "timeup at {}", at),
            Self::Dropout { id } => write!(f, "{} dropped out", id),
            Self::Payout { total, basepay } => write!(f, "payout {} (base {})", total, basepay),
            Self::Gameover => write!(f, "game over"),
        }
    }
}
