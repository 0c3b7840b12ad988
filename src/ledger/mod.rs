//! Authoritative earnings and visit history of a session.
mod error;
mod ledger;
mod record;

pub use error::*;
pub use ledger::*;
pub use record::*;
