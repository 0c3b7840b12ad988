use crate::ConfigError;
use crate::Earnings;
use crate::Pairing;
use crate::Strategy;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed 2×2 payoff lookup.
///
/// `payoff(a, b)` is what a player choosing `a` earns against `b`. The key
/// structure is symmetric but the values need not be (`HD` ≠ `DH` is fine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoffTable(BTreeMap<Pairing, Earnings>);

impl PayoffTable {
    /// Lookup by concatenated key. A missing entry is a misconfiguration.
    pub fn payoff(&self, a: Strategy, b: Strategy) -> Result<Earnings, ConfigError> {
        self.get(Pairing(a, b))
    }
    pub fn get(&self, pairing: Pairing) -> Result<Earnings, ConfigError> {
        self.0
            .get(&pairing)
            .copied()
            .ok_or(ConfigError::MissingPayoff(pairing))
    }
    /// Every combination of the two strategies must be present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Pairing::all()
            .into_iter()
            .try_for_each(|pairing| self.get(pairing).map(|_| ()))
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::from([
            (Pairing(Strategy::Hawk, Strategy::Hawk), 0),
            (Pairing(Strategy::Hawk, Strategy::Dove), 100),
            (Pairing(Strategy::Dove, Strategy::Hawk), 20),
            (Pairing(Strategy::Dove, Strategy::Dove), 60),
        ])
    }
}

impl<const K: usize> From<[(Pairing, Earnings); K]> for PayoffTable {
    fn from(entries: [(Pairing, Earnings); K]) -> Self {
        Self(BTreeMap::from(entries))
    }
}

impl std::fmt::Display for PayoffTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cells = self
            .0
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{{{}}}", cells)
    }
}
