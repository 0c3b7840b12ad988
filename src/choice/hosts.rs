use super::*;
use crate::ParticipantId;
use crate::Weight;
use rand::Rng;
use std::collections::HashMap;

/// Per-target weights deciding whom a bot visits.
/// Targets seen for the first time start at the configured default.
#[derive(Debug, Clone, PartialEq)]
pub struct HostWeights {
    default: Weight,
    weights: HashMap<ParticipantId, Weight>,
}

impl HostWeights {
    pub fn new(default: Weight) -> Self {
        Self {
            default,
            weights: HashMap::new(),
        }
    }
    pub fn get(&self, host: &str) -> Weight {
        self.weights.get(host).copied().unwrap_or(self.default)
    }
    pub fn update(&mut self, host: &str, delta: Weight) {
        *self.entry(host) += delta;
    }
    /// Chooses a target from the roster, registering unseen hosts first.
    /// Returns `None` for an empty roster.
    pub fn sample<'a, R: Rng + ?Sized>(
        &mut self,
        roster: &'a [ParticipantId],
        rng: &mut R,
    ) -> Option<&'a ParticipantId> {
        if roster.is_empty() {
            return None;
        }
        let weights = roster
            .iter()
            .map(|host| *self.entry(host))
            .collect::<Vec<Weight>>();
        roster.get(pick_index(&weights, rng))
    }
    fn entry(&mut self, host: &str) -> &mut Weight {
        self.weights
            .entry(host.to_string())
            .or_insert(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Fixed;
    fn roster() -> Vec<ParticipantId> {
        vec!["a".into(), "b".into(), "c".into()]
    }
    #[test]
    fn unseen_hosts_default() {
        let mut hosts = HostWeights::new(80.0);
        assert_eq!(hosts.get("a"), 80.0);
        hosts.update("a", 20.0);
        assert_eq!(hosts.get("a"), 100.0);
        assert_eq!(hosts.get("z"), 80.0);
    }
    #[test]
    fn uniform_defaults_split_evenly() {
        let mut hosts = HostWeights::new(80.0);
        let roster = roster();
        assert_eq!(hosts.sample(&roster, &mut Fixed(0.1)).unwrap(), "a");
        assert_eq!(hosts.sample(&roster, &mut Fixed(0.5)).unwrap(), "b");
        assert_eq!(hosts.sample(&roster, &mut Fixed(0.9)).unwrap(), "c");
    }
    #[test]
    fn empty_roster_has_no_target() {
        let mut hosts = HostWeights::new(80.0);
        assert!(hosts.sample(&[], &mut Fixed(0.5)).is_none());
    }
}
