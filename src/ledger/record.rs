use crate::Earnings;
use crate::ParticipantId;
use crate::Round;
use crate::Strategy;
use serde::Deserialize;
use serde::Serialize;

/// Human or automated participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Human,
    Bot,
}

/// One scored encounter, stored under the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub visitee: ParticipantId,
    pub visit_strategy: Strategy,
    pub response_strategy: Strategy,
    pub visitor_earning: Earnings,
    pub visitee_earning: Earnings,
    pub visit_time: u64,
    pub respond_time: u64,
    pub round: Round,
    pub visitor_timed_out: bool,
    pub visitee_timed_out: bool,
}

/// Entry of a visit history: a scored visit or a dropout marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisitEntry {
    Visit(VisitRecord),
    Dropout {
        #[serde(rename = "DROPOUT")]
        round: Round,
    },
}

impl VisitEntry {
    pub fn visit(&self) -> Option<&VisitRecord> {
        match self {
            Self::Visit(v) => Some(v),
            Self::Dropout { .. } => None,
        }
    }
    pub fn is_dropout(&self) -> bool {
        matches!(self, Self::Dropout { .. })
    }
}

/// Everything the ledger knows about one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub visits: Vec<VisitEntry>,
    pub orders: Vec<Vec<ParticipantId>>,
    pub total_earnings: Earnings,
    pub timeups: usize,
    pub client_type: ClientType,
    /// Zero until base pay is granted.
    pub basepay: Earnings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<Vec<String>>,
}

impl Record {
    pub fn new(client_type: ClientType) -> Self {
        Self {
            visits: Vec::new(),
            orders: Vec::new(),
            total_earnings: 0,
            timeups: 0,
            client_type,
            basepay: 0,
            interface: None,
        }
    }
    /// Most recent scored visit, skipping dropout markers.
    pub fn last_visit(&self) -> Option<&VisitRecord> {
        self.visits.iter().rev().find_map(VisitEntry::visit)
    }
    pub fn dropped(&self) -> bool {
        self.visits.iter().any(VisitEntry::is_dropout)
    }
}
