//! Ordered stages and steps of the experiment.
//!
//! `precache → [welcome → instructions → practice] → repeat_N{visit → respond}
//! → endSurvey → payoffs → gameover`, with the bracketed tutorial block
//! present only when the session is configured for it.
mod barrier;
mod plan;
mod sequencer;
mod step;

pub use barrier::*;
pub use plan::*;
pub use sequencer::*;
pub use step::*;
