use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::approval::DualApprovalGate;

/// A hostel-level scoring record, verified independently of the owning
/// event's own approval flags.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventScore {
    pub id: Uuid,
    pub event_id: Uuid,
    pub hostel_id: Uuid,
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub score: i64,
    pub remarks: Option<String>,
    pub result_verified_by_tusc: bool,
    pub result_verified_by_dsw: bool,
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
    pub updated_at: DateTime<Utc>, // TIMESTAMPTZ
}

impl EventScore {
    /// Score verification reuses the event-level gate; scores carry no
    /// persisted final bit, visibility is governed by the owning event.
    pub fn verification_gate(&self) -> DualApprovalGate {
        DualApprovalGate {
            tusc: self.result_verified_by_tusc,
            dsw: self.result_verified_by_dsw,
            finalized: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventScoreInput {
    pub event_id: Uuid,
    pub hostel_id: Uuid,
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub score: i64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventScoreUpdateInput {
    pub score: i64,
    pub remarks: Option<String>,
}
