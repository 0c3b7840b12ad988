use super::*;
use crate::Settings;

/// A stage and the steps it runs, `repeat` times over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub stage: Stage,
    pub steps: Vec<Step>,
    pub repeat: usize,
}

impl Block {
    pub fn once(stage: Stage, steps: Vec<Step>) -> Self {
        Self {
            stage,
            steps,
            repeat: 1,
        }
    }
}

/// Full stage sequence, fixed at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan(Vec<Block>);

impl Plan {
    /// Every step in execution order, repeats unrolled.
    pub fn positions(&self) -> Vec<Position> {
        self.0
            .iter()
            .flat_map(|block| {
                (1..=block.repeat).flat_map(move |round| {
                    block.steps.iter().map(move |step| Position::new(*step, round))
                })
            })
            .collect()
    }
}

impl From<&Settings> for Plan {
    fn from(settings: &Settings) -> Self {
        let mut blocks = vec![Block::once(Stage::Precache, vec![Step::Precache])];
        if settings.tutorial {
            blocks.push(Block::once(
                Stage::Tutorial,
                vec![Step::Welcome, Step::Instructions, Step::Practice],
            ));
        }
        blocks.push(Block {
            stage: Stage::Game,
            steps: vec![Step::Visit, Step::Respond],
            repeat: settings.repeat,
        });
        blocks.push(Block::once(Stage::EndSurvey, vec![Step::EndSurvey]));
        blocks.push(Block::once(Stage::Payoffs, vec![Step::Payoffs]));
        Self(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn canonical_sequence() {
        let settings = Settings {
            repeat: 2,
            tutorial: false,
            ..Settings::default()
        };
        let steps = Plan::from(&settings)
            .positions()
            .into_iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            steps,
            vec![
                "precache#1",
                "visit#1",
                "respond#1",
                "visit#2",
                "respond#2",
                "endSurvey#1",
                "payoffs#1",
            ]
        );
    }
    #[test]
    fn tutorial_block_is_static() {
        let with = Plan::from(&Settings::default());
        let without = Plan::from(&Settings {
            tutorial: false,
            ..Settings::default()
        });
        assert_eq!(with.0.len(), without.0.len() + 1);
        assert_eq!(with.0[1].stage, Stage::Tutorial);
        assert!(without.0.iter().all(|b| b.stage != Stage::Tutorial));
        assert_eq!(with.positions().len(), 3 + 1 + 2 * 25 + 2);
    }
    #[test]
    fn rules() {
        assert_eq!(Step::Precache.rule(), StepRule::Solo);
        assert_eq!(Step::Instructions.rule(), StepRule::Solo);
        assert_eq!(Step::Visit.rule(), StepRule::Wait);
        assert_eq!(Step::Payoffs.rule(), StepRule::Wait);
    }
}
