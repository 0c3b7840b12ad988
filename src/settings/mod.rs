//! Experiment configuration, read once at session setup.
mod error;
mod mode;
mod settings;

pub use error::*;
pub use mode::*;
pub use settings::*;
