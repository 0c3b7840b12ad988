use super::*;
use crate::BotPolicy;
use crate::Event;
use crate::Message;
use crate::ParticipantId;
use crate::Position;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Automated participant. All decisions come from its [`BotPolicy`];
/// the seed makes a whole bot session reproducible.
pub struct Bot {
    policy: BotPolicy,
    rng: SmallRng,
}

impl Bot {
    pub fn new(policy: BotPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn policy(&self) -> &BotPolicy {
        &self.policy
    }
}

#[async_trait::async_trait]
impl Participant for Bot {
    async fn decide(&mut self, at: &Position, roster: &[ParticipantId]) -> Vec<Message> {
        self.policy.enter(at, roster, &mut self.rng)
    }
    async fn notify(&mut self, event: &Event) {
        let messages = self.policy.react(event, &mut self.rng);
        debug_assert!(messages.is_empty(), "only steps produce messages");
    }
}
