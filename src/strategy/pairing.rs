use super::*;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Ordered pair of strategies, keyed in tables by concatenating the symbols
/// (`"HD"` is a Hawk meeting a Dove, seen from the Hawk's side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pairing(pub Strategy, pub Strategy);

impl Pairing {
    pub const fn all() -> [Self; 4] {
        [
            Self(Strategy::Hawk, Strategy::Hawk),
            Self(Strategy::Hawk, Strategy::Dove),
            Self(Strategy::Dove, Strategy::Hawk),
            Self(Strategy::Dove, Strategy::Dove),
        ]
    }
    /// The same encounter seen from the other side.
    pub const fn mirror(self) -> Self {
        Self(self.1, self.0)
    }
}

impl TryFrom<&str> for Pairing {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Ok(Self(Strategy::try_from(a)?, Strategy::try_from(b)?)),
            _ => Err(format!("payoff key must be two symbols, got {:?}", s)),
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl Serialize for Pairing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pairing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}
