use crate::ConfigError;
use crate::ParticipantId;
use crate::Round;

/// A rejected ledger mutation. The ledger is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// No matching visit was queued (never sent, or already answered).
    Unqueued { round: Round, visitor: ParticipantId },
    /// The visitor already visited someone this round.
    Revisit { round: Round, visitor: ParticipantId },
    SelfVisit(ParticipantId),
    Payoff(ConfigError),
}

impl From<ConfigError> for LedgerError {
    fn from(e: ConfigError) -> Self {
        Self::Payoff(e)
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unqueued { round, visitor } => {
                write!(f, "no queued visit from {} in round {}", visitor, round)
            }
            Self::Revisit { round, visitor } => {
                write!(f, "{} already visited in round {}", visitor, round)
            }
            Self::SelfVisit(id) => write!(f, "{} cannot visit itself", id),
            Self::Payoff(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LedgerError {}
