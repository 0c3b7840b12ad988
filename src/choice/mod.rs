//! Weighted random selection and additive reinforcement.
mod hosts;
mod pick;
mod weights;

pub use hosts::*;
pub use pick::*;
pub use weights::*;

#[cfg(test)]
pub(crate) use pick::tests::Fixed;
