use crate::Earnings;
use crate::ParticipantId;
use crate::Round;
use crate::Strategy;
use serde::Deserialize;
use serde::Serialize;

/// A visit waiting for the visitee's response. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitEvent {
    pub visitor: ParticipantId,
    pub strategy: Strategy,
    /// Milliseconds the visitor took to decide.
    pub visit_time: u64,
    pub visitor_timed_out: bool,
}

impl VisitEvent {
    pub fn new(visitor: ParticipantId, strategy: Strategy, visit_time: u64, timed_out: bool) -> Self {
        Self {
            visitor,
            strategy,
            visit_time,
            visitor_timed_out: timed_out,
        }
    }
}

/// The visitee's answer to one visit, as submitted to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEvent {
    pub visitor: ParticipantId,
    pub visitee: ParticipantId,
    pub visit_strategy: Strategy,
    pub response_strategy: Strategy,
    pub visit_time: u64,
    pub respond_time: u64,
    pub round: Round,
    pub visitor_timed_out: bool,
    pub visitee_timed_out: bool,
}

impl ResponseEvent {
    /// Answers `visit` on behalf of `visitee`.
    pub fn answer(
        visit: &VisitEvent,
        visitee: ParticipantId,
        strategy: Strategy,
        respond_time: u64,
        round: Round,
        timed_out: bool,
    ) -> Self {
        Self {
            visitor: visit.visitor.clone(),
            visitee,
            visit_strategy: visit.strategy,
            response_strategy: strategy,
            visit_time: visit.visit_time,
            respond_time,
            round,
            visitor_timed_out: visit.visitor_timed_out,
            visitee_timed_out: timed_out,
        }
    }
}

/// Chosen target and strategy for this round's visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDecision {
    pub visitee: ParticipantId,
    pub strategy: Strategy,
    #[serde(default)]
    pub decision_time: u64,
    #[serde(default)]
    pub timeup: bool,
}

/// Order in which a participant answered its visitors, kept for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub visitors: Vec<ParticipantId>,
}

/// Free-form end-of-game questionnaire answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub answers: serde_json::Value,
}

/// Symbols a human's interface assigned to the other participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSubmission {
    pub symbols: Vec<String>,
}

/// Sent to each visitor before the next visit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsUpdate {
    /// Round of the visit that `last_round` was earned in.
    pub round: Round,
    pub last_round: Earnings,
    pub total: Earnings,
}
