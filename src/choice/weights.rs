use super::*;
use crate::Strategy;
use crate::Weight;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// Reinforcement weights over the two strategies.
///
/// Updates are additive and never renormalized, so long sessions let the
/// weights grow without bound; only their ratio matters for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(rename = "H")]
    pub hawk: Weight,
    #[serde(rename = "D")]
    pub dove: Weight,
}

impl Weights {
    pub fn new(hawk: Weight, dove: Weight) -> Self {
        Self { hawk, dove }
    }
    pub fn get(&self, strategy: Strategy) -> Weight {
        match strategy {
            Strategy::Hawk => self.hawk,
            Strategy::Dove => self.dove,
        }
    }
    /// `weights[key] += delta`, with no clamping or decay.
    pub fn update(&mut self, strategy: Strategy, delta: Weight) {
        match strategy {
            Strategy::Hawk => self.hawk += delta,
            Strategy::Dove => self.dove += delta,
        }
    }
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Strategy {
        Strategy::from(pick_index(&[self.hawk, self.dove], rng))
    }
    /// Finite, nonnegative, and not all zero.
    pub fn is_valid(&self) -> bool {
        let each = [self.hawk, self.dove];
        each.iter().all(|w| w.is_finite() && *w >= 0.0) && each.iter().any(|w| *w > 0.0)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(crate::BOT_WEIGHT, crate::BOT_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Fixed;
    #[test]
    fn update_is_additive() {
        let mut w = Weights::new(80.0, 80.0);
        w.update(Strategy::Hawk, 100.0);
        w.update(Strategy::Hawk, -20.0);
        w.update(Strategy::Dove, 60.0);
        assert_eq!(w, Weights::new(160.0, 140.0));
    }
    #[test]
    fn sample_maps_index_to_strategy() {
        let w = Weights::new(1.0, 3.0);
        assert_eq!(w.sample(&mut Fixed(0.2)), Strategy::Hawk);
        assert_eq!(w.sample(&mut Fixed(0.3)), Strategy::Dove);
    }
    #[test]
    fn validity() {
        assert!(Weights::new(0.0, 1.0).is_valid());
        assert!(!Weights::new(0.0, 0.0).is_valid());
        assert!(!Weights::new(-1.0, 5.0).is_valid());
        assert!(!Weights::new(f64::NAN, 5.0).is_valid());
    }
}
