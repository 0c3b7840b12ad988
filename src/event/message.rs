use super::*;
use crate::ParticipantId;
use crate::Position;
use serde::Deserialize;
use serde::Serialize;

/// Everything a participant can tell the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Completes the visit step with a decision.
    Visit(VisitDecision),
    Response(ResponseEvent),
    Order(OrderSubmission),
    Survey(SurveySubmission),
    Interface(InterfaceSubmission),
    /// Completes the current step without a payload.
    Done,
    /// Connection lost; the participant will be replaced.
    Disconnect,
}

impl Message {
    pub fn decode(s: &str) -> Result<Self, MessageError> {
        serde_json::from_str(s).map_err(|e| MessageError::Malformed(e.to_string()))
    }
    /// Whether the message finishes the sender's current step.
    pub fn completes(&self) -> bool {
        matches!(self, Self::Visit(_) | Self::Done)
    }
}

/// A message stamped with its sender and the step it was produced for.
/// Messages stamped with any other step than the current one are stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: ParticipantId,
    pub at: Position,
    pub message: Message,
}

impl Envelope {
    pub fn new(from: ParticipantId, at: Position, message: Message) -> Self {
        Self { from, at, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strategy;
    #[test]
    fn decode_tagged_variants() {
        let visit = Message::decode(r#"{"type":"visit","visitee":"p2","strategy":"H"}"#).unwrap();
        assert_eq!(
            visit,
            Message::Visit(VisitDecision {
                visitee: "p2".into(),
                strategy: Strategy::Hawk,
                decision_time: 0,
                timeup: false,
            })
        );
        assert_eq!(Message::decode(r#"{"type":"done"}"#).unwrap(), Message::Done);
        let order = Message::decode(r#"{"type":"order","visitors":["a","b"]}"#).unwrap();
        assert_eq!(
            order,
            Message::Order(OrderSubmission {
                visitors: vec!["a".into(), "b".into()]
            })
        );
    }
    #[test]
    fn decode_rejects_untyped_payloads() {
        assert!(Message::decode(r#"{"visitee":"p2","strategy":"H"}"#).is_err());
        assert!(Message::decode(r#"{"type":"visit","visitee":"p2","strategy":"X"}"#).is_err());
        assert!(Message::decode("not json").is_err());
    }
    #[test]
    fn completion_signals() {
        assert!(Message::Done.completes());
        assert!(!Message::Disconnect.completes());
        assert!(
            !Message::Order(OrderSubmission { visitors: vec![] }).completes()
        );
    }
}
