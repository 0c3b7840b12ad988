use crate::ParticipantId;
use crate::Position;

/// Inbound message rejected at the session boundary. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageError {
    Malformed(String),
    UnknownTarget(ParticipantId),
    SelfVisit(ParticipantId),
    Impersonation(ParticipantId),
    OutOfStep(Position),
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
            Self::UnknownTarget(id) => write!(f, "no participant {}", id),
            Self::SelfVisit(id) => write!(f, "{} cannot visit itself", id),
            Self::Impersonation(id) => write!(f, "response claims to come from {}", id),
            Self::OutOfStep(p) => write!(f, "message not accepted during {}", p),
        }
    }
}

impl std::error::Error for MessageError {}
