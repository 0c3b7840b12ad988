use crate::Round;
use serde::Deserialize;
use serde::Serialize;

/// Named groups of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Precache,
    Tutorial,
    Game,
    EndSurvey,
    Payoffs,
}

/// Smallest unit of progress a participant signals done for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Precache,
    Welcome,
    Instructions,
    Practice,
    Visit,
    Respond,
    EndSurvey,
    Payoffs,
}

/// Advancement rule of a step.
/// - `Wait`: nobody moves on until every participant is done.
/// - `Solo`: each participant moves on as soon as it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRule {
    Wait,
    Solo,
}

impl Step {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Precache => "precache",
            Self::Welcome => "welcome",
            Self::Instructions => "instructions",
            Self::Practice => "practice",
            Self::Visit => "visit",
            Self::Respond => "respond",
            Self::EndSurvey => "endSurvey",
            Self::Payoffs => "payoffs",
        }
    }
    pub const fn stage(self) -> Stage {
        match self {
            Self::Precache => Stage::Precache,
            Self::Welcome | Self::Instructions | Self::Practice => Stage::Tutorial,
            Self::Visit | Self::Respond => Stage::Game,
            Self::EndSurvey => Stage::EndSurvey,
            Self::Payoffs => Stage::Payoffs,
        }
    }
    pub const fn rule(self) -> StepRule {
        match self.stage() {
            Stage::Precache | Stage::Tutorial => StepRule::Solo,
            _ => StepRule::Wait,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A step within a specific repetition of its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub step: Step,
    pub round: Round,
}

impl Position {
    pub fn new(step: Step, round: Round) -> Self {
        Self { step, round }
    }
    pub fn stage(&self) -> Stage {
        self.step.stage()
    }
    pub fn rule(&self) -> StepRule {
        self.step.rule()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}#{}", self.step, self.round)
    }
}
