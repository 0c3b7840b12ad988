//! Participants and the async tasks that run them.
//!
//! - [`Participant`]: trait for pluggable decision makers
//! - [`Actor`]: async task wrapper relaying events and messages
//! - [`Bot`]: automated participant driven by a [`crate::BotPolicy`]
//! - [`Human`]: interactive terminal participant (requires `cli` feature)
mod actor;
mod bot;
#[cfg(feature = "cli")]
mod human;
mod participant;

pub use actor::*;
pub use bot::*;
#[cfg(feature = "cli")]
pub use human::*;
pub use participant::*;
