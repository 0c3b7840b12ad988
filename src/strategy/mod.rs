mod pairing;
mod strategy;

pub use pairing::*;
pub use strategy::*;
