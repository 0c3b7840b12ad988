//! Typed payloads crossing the session boundary.
//!
//! - [`Message`]: participant → session, validated before touching the ledger
//! - [`Event`]: session → participant
mod error;
mod event;
mod message;
mod records;

pub use error::*;
pub use event::*;
pub use message::*;
pub use records::*;
