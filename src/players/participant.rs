use crate::Event;
use crate::Message;
use crate::ParticipantId;
use crate::Position;

/// Anything that can sit in a session: a bot, a terminal user, a remote
/// client behind some transport. The session only sees the messages.
#[async_trait::async_trait]
pub trait Participant: Send {
    /// False once the participant is gone (closed input, dropped socket).
    /// The session then substitutes a NAIVE bot.
    fn alive(&self) -> bool {
        true
    }
    /// A step begins. `roster` lists every other participant.
    /// The returned messages are stamped with `at`; the step completes for
    /// this participant with a [`Message::Visit`] or [`Message::Done`].
    async fn decide(&mut self, at: &Position, roster: &[ParticipantId]) -> Vec<Message>;
    /// Any other event addressed to this participant.
    async fn notify(&mut self, event: &Event);
}
