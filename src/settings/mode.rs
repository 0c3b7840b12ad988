use super::*;
use serde::Deserialize;
use serde::Serialize;

/// How bots decide.
/// - `Naive` never visits and never answers; it only keeps the game moving.
/// - `Reinforcement` samples from weights that grow with realized payoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BotStrategy {
    Naive,
    Reinforcement,
}

impl TryFrom<&str> for BotStrategy {
    type Error = ConfigError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "NAIVE" => Ok(Self::Naive),
            "REINFORCEMENT" => Ok(Self::Reinforcement),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl TryFrom<String> for BotStrategy {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}

impl From<BotStrategy> for String {
    fn from(mode: BotStrategy) -> Self {
        mode.to_string()
    }
}

impl std::fmt::Display for BotStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Naive => write!(f, "NAIVE"),
            Self::Reinforcement => write!(f, "REINFORCEMENT"),
        }
    }
}
