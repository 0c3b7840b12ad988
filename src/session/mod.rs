//! Single-consumer coordinator of a running session.
//!
//! - [`Session`]: owns the ledger and sequencer, drives every step
//! - [`Roster`]: who sits in the session and how to reach them
//! - [`Channel`]: inbound envelope queue shared by all actors
//! - [`Timer`]: deadline of the step in progress
mod channel;
mod roster;
mod session;
mod timer;

pub use channel::*;
pub use roster::*;
pub use session::*;
pub use timer::*;
