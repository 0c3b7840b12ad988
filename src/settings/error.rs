use crate::Pairing;

/// Fatal misconfiguration. Raised before any participant is admitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingPayoff(Pairing),
    UnknownStrategy(String),
    MalformedWeights(String),
    ZeroRepeat,
    Penalty(f64),
    Malformed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPayoff(p) => write!(f, "payoff table has no entry for {}", p),
            Self::UnknownStrategy(s) => write!(f, "unknown bot strategy {:?}", s),
            Self::MalformedWeights(s) => write!(f, "malformed bot weights: {}", s),
            Self::ZeroRepeat => write!(f, "REPEAT must be at least one round"),
            Self::Penalty(p) => write!(f, "PERCENT_PENALTY {} outside [0, 1]", p),
            Self::Malformed(s) => write!(f, "malformed settings: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}
