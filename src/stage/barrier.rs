use crate::ParticipantId;
use std::collections::BTreeSet;

/// Tracks who has completed the current step.
///
/// Completion is recorded at most once per participant, so a real decision
/// arriving after a forced one (or vice versa) is recognized as late.
#[derive(Debug, Clone, Default)]
pub struct Barrier {
    expected: BTreeSet<ParticipantId>,
    done: BTreeSet<ParticipantId>,
}

impl Barrier {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        Self {
            expected: ids.into_iter().collect(),
            done: BTreeSet::new(),
        }
    }
    /// Returns true only the first time an expected participant finishes.
    pub fn done(&mut self, id: &str) -> bool {
        self.expected.contains(id) && self.done.insert(id.to_string())
    }
    pub fn is_done(&self, id: &str) -> bool {
        self.done.contains(id)
    }
    pub fn complete(&self) -> bool {
        self.done.len() == self.expected.len()
    }
    pub fn pending(&self) -> Vec<ParticipantId> {
        self.expected.difference(&self.done).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn completes_once_everyone_is_done() {
        let mut barrier = Barrier::new(vec!["a".to_string(), "b".to_string()]);
        assert!(!barrier.complete());
        assert!(barrier.done("a"));
        assert_eq!(barrier.pending(), vec!["b".to_string()]);
        assert!(barrier.done("b"));
        assert!(barrier.complete());
    }
    #[test]
    fn done_is_at_most_once() {
        let mut barrier = Barrier::new(vec!["a".to_string()]);
        assert!(barrier.done("a"));
        assert!(!barrier.done("a"));
        assert!(!barrier.done("stranger"));
        assert!(barrier.is_done("a"));
    }
    #[test]
    fn empty_barrier_is_complete() {
        assert!(Barrier::default().complete());
    }
}
