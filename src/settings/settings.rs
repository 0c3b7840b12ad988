use super::*;
use crate::Earnings;
use crate::PayoffTable;
use crate::Weight;
use crate::Weights;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Initial weights of a reinforcement bot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotWeights {
    pub visit: Weights,
    pub respond: Weights,
    #[serde(rename = "hostWeight")]
    pub host_weight: Weight,
}

impl Default for BotWeights {
    fn default() -> Self {
        Self {
            visit: Weights::default(),
            respond: Weights::default(),
            host_weight: crate::BOT_WEIGHT,
        }
    }
}

/// Session settings, keyed the way the experiment files spell them
/// (`REPEAT`, `PAYOFFS`, `BOT_STRATEGY`, ...). Absent keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Settings {
    /// Names the logic node and the ledger dump of this session.
    pub session_id: u64,
    pub repeat: usize,
    pub tutorial: bool,
    /// Fill the room with bots only.
    pub simulation: bool,
    pub payoffs: PayoffTable,
    pub bot_strategy: BotStrategy,
    pub bot_weights: BotWeights,
    pub percent_penalty: f64,
    pub basepay: Earnings,
    /// Step name to milliseconds.
    pub timer: BTreeMap<String, u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_id: 1,
            repeat: crate::REPEAT,
            tutorial: true,
            simulation: true,
            payoffs: PayoffTable::default(),
            bot_strategy: BotStrategy::Reinforcement,
            bot_weights: BotWeights::default(),
            percent_penalty: crate::PERCENT_PENALTY,
            basepay: crate::BASEPAY,
            timer: BTreeMap::from([
                ("visit".to_string(), crate::VISIT_TIMEOUT),
                ("respond".to_string(), crate::RESPOND_TIMEOUT),
            ]),
        }
    }
}

impl Settings {
    /// Parses and validates in one go.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings = serde_json::from_str::<Self>(json)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Malformed(format!("{}: {}", path.display(), e)))
            .and_then(|json| Self::from_json(&json))
    }
    /// Every configuration error is fatal; call before admitting anyone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat == 0 {
            return Err(ConfigError::ZeroRepeat);
        }
        if !(0.0..=1.0).contains(&self.percent_penalty) {
            return Err(ConfigError::Penalty(self.percent_penalty));
        }
        if !self.bot_weights.visit.is_valid() {
            return Err(ConfigError::MalformedWeights("visit".into()));
        }
        if !self.bot_weights.respond.is_valid() {
            return Err(ConfigError::MalformedWeights("respond".into()));
        }
        let host = self.bot_weights.host_weight;
        if !host.is_finite() || host <= 0.0 {
            return Err(ConfigError::MalformedWeights("hostWeight".into()));
        }
        self.payoffs.validate()
    }
    pub fn timeout(&self, step: &str) -> Option<Duration> {
        self.timer.get(step).copied().map(Duration::from_millis)
    }
    /// Participants with fewer timeups than this earn the base pay.
    pub fn basepay_threshold(&self) -> f64 {
        self.repeat as f64 / 2.0
    }
    pub fn nodename(&self) -> String {
        format!("lgc{}", self.session_id)
    }
}
