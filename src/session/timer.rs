use std::time::Duration;
use tokio::time::Instant;

/// Deadline of the current step, if the step is timed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Arms the timer, or disarms it for untimed steps.
    pub fn start(&mut self, duration: Option<Duration>) {
        self.deadline = duration.map(|d| Instant::now() + d);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
