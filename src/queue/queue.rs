use crate::VisitEvent;
use rand::Rng;

/// Visits received this round and not yet answered.
///
/// Holds at most one event per visitor per round; the round structure
/// (one visit per participant per round) guarantees it rather than the queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitQueue(Vec<VisitEvent>);

impl VisitQueue {
    pub fn enqueue(&mut self, event: VisitEvent) {
        self.0.push(event);
    }
    /// Uniform in-place permutation (Fisher-Yates, forward pass).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 1..self.0.len() {
            let j = rng.random_range(0..=i);
            self.0.swap(i, j);
        }
    }
    /// Takes every queued event, leaving the queue empty.
    pub fn drain_all(&mut self) -> Vec<VisitEvent> {
        std::mem::take(&mut self.0)
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
