use super::*;
use crate::Envelope;
use crate::Event;
use crate::Message;
use crate::ParticipantId;
use tokio::sync::mpsc::*;

/// Wrapper that runs a Participant in its own async task.
///
/// - Session unicasts Step when a step begins for this participant
/// - Actor calls Participant::decide and stamps each message with the step
/// - Every other event is forwarded to Participant::notify
/// - A participant that stops being alive is reported as disconnected
pub struct Actor {
    id: ParticipantId,
    player: Box<dyn Participant>,
    getter: UnboundedReceiver<Event>,
    sender: UnboundedSender<Envelope>,
}

impl Actor {
    pub fn spawn(
        id: ParticipantId,
        player: Box<dyn Participant>,
        sender: UnboundedSender<Envelope>,
    ) -> UnboundedSender<Event> {
        let (tx, rx) = unbounded_channel();
        let actor = Self {
            id,
            player,
            sender,
            getter: rx,
        };
        tokio::spawn(actor.run());
        tx
    }
    async fn run(mut self) {
        loop {
            match self.getter.recv().await {
                Some(Event::Step { at, roster }) => {
                    log::debug!("[actor {}] entering {}", self.id, at);
                    let messages = self.player.decide(&at, &roster).await;
                    for message in messages {
                        self.send(Envelope::new(self.id.clone(), at, message));
                    }
                    if !self.player.alive() {
                        log::info!("[actor {}] participant disconnected", self.id);
                        self.send(Envelope::new(self.id.clone(), at, Message::Disconnect));
                        break;
                    }
                }
                Some(Event::Gameover) => {
                    self.player.notify(&Event::Gameover).await;
                    break;
                }
                Some(ref event) => {
                    log::trace!("[actor {}] received {}", self.id, event);
                    self.player.notify(event).await;
                }
                None => break,
            }
        }
    }
    fn send(&self, envelope: Envelope) {
        if let Err(e) = self.sender.send(envelope) {
            log::warn!("[actor {}] session gone: {:?}", self.id, e.0.message);
        }
    }
}
