use crate::ClientType;
use crate::Event;
use crate::ParticipantId;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

/// Inbox of one participant's actor.
#[derive(Debug)]
pub struct Seat {
    inbox: UnboundedSender<Event>,
    client_type: ClientType,
}

/// Everyone sitting in the session, in id order.
#[derive(Debug, Default)]
pub struct Roster(BTreeMap<ParticipantId, Seat>);

impl Roster {
    /// Returns false (and changes nothing) if the id is taken.
    pub fn sit(&mut self, id: &str, inbox: UnboundedSender<Event>, client_type: ClientType) -> bool {
        if self.0.contains_key(id) {
            return false;
        }
        self.0.insert(id.to_string(), Seat { inbox, client_type });
        true
    }
    /// Routes `id` to a new actor under the same identity.
    pub fn replace(&mut self, id: &str, inbox: UnboundedSender<Event>, client_type: ClientType) {
        self.0.insert(id.to_string(), Seat { inbox, client_type });
    }
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }
    pub fn client_type(&self, id: &str) -> Option<ClientType> {
        self.0.get(id).map(|seat| seat.client_type)
    }
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.0.keys().cloned().collect()
    }
    /// Everyone but `id`.
    pub fn others(&self, id: &str) -> Vec<ParticipantId> {
        self.0.keys().filter(|k| *k != id).cloned().collect()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn unicast(&self, id: &str, event: Event) {
        self.0
            .get(id)
            .map(|seat| seat.inbox.send(event))
            .and_then(|res| res.err())
            .inspect(|e| log::warn!("[session] failed unicast to {}: {}", id, e.0));
    }
    pub fn broadcast(&self, event: Event) {
        self.0
            .iter()
            .filter_map(|(id, seat)| seat.inbox.send(event.clone()).err().map(|e| (id, e)))
            .for_each(|(id, e)| log::warn!("[session] failed broadcast to {}: {}", id, e.0));
    }
    pub fn broadcast_except(&self, skip: &str, event: Event) {
        self.0
            .iter()
            .filter(|(id, _)| *id != skip)
            .filter_map(|(id, seat)| seat.inbox.send(event.clone()).err().map(|e| (id, e)))
            .for_each(|(id, e)| log::warn!("[session] failed broadcast to {}: {}", id, e.0));
    }
}
