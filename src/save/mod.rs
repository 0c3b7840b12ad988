//! JSON artifacts of a session. Write failures are logged, never fatal.
mod archive;

pub use archive::*;
