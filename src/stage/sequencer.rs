use super::*;

/// Cursor over a [`Plan`]. Once exhausted the game is over.
#[derive(Debug, Clone)]
pub struct Sequencer {
    positions: Vec<Position>,
    cursor: usize,
}

impl Sequencer {
    pub fn new(plan: &Plan) -> Self {
        Self {
            positions: plan.positions(),
            cursor: 0,
        }
    }
    pub fn peek(&self) -> Option<&Position> {
        self.positions.get(self.cursor)
    }
    pub fn is_over(&self) -> bool {
        self.cursor >= self.positions.len()
    }
    /// The next wait step alone, or the longest run of consecutive solo
    /// steps (which participants walk through at their own pace).
    pub fn next_stretch(&mut self) -> Vec<Position> {
        let mut stretch = Vec::new();
        while let Some(position) = self.peek().copied() {
            match (position.rule(), stretch.is_empty()) {
                (StepRule::Wait, true) => {
                    self.cursor += 1;
                    stretch.push(position);
                    break;
                }
                (StepRule::Wait, false) => break,
                (StepRule::Solo, _) => {
                    self.cursor += 1;
                    stretch.push(position);
                }
            }
        }
        stretch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    #[test]
    fn stretches_group_solo_steps() {
        let settings = Settings {
            repeat: 1,
            ..Settings::default()
        };
        let mut sequencer = Sequencer::new(&Plan::from(&settings));
        let solo = sequencer.next_stretch();
        assert_eq!(
            solo.iter().map(|p| p.step).collect::<Vec<_>>(),
            vec![Step::Precache, Step::Welcome, Step::Instructions, Step::Practice]
        );
        assert_eq!(sequencer.next_stretch(), vec![Position::new(Step::Visit, 1)]);
        assert_eq!(sequencer.next_stretch(), vec![Position::new(Step::Respond, 1)]);
        assert_eq!(sequencer.next_stretch(), vec![Position::new(Step::EndSurvey, 1)]);
        assert_eq!(sequencer.next_stretch(), vec![Position::new(Step::Payoffs, 1)]);
        assert!(sequencer.next_stretch().is_empty());
        assert!(sequencer.is_over());
    }
    #[test]
    fn repeated_block_yields_one_stretch_per_step() {
        let settings = Settings {
            repeat: 3,
            tutorial: false,
            ..Settings::default()
        };
        let mut sequencer = Sequencer::new(&Plan::from(&settings));
        let mut rounds = Vec::new();
        while !sequencer.is_over() {
            let stretch = sequencer.next_stretch();
            assert!(!stretch.is_empty());
            rounds.extend(stretch.iter().filter(|p| p.step == Step::Respond).map(|p| p.round));
        }
        assert_eq!(rounds, vec![1, 2, 3]);
    }
}
