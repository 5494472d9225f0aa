use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;
use crate::services::approval::DualApprovalGate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub mode: EventMode,
    pub category: EventCategory,
    pub tusc_approved: bool,
    pub dsw_approved: bool,
    pub final_approved: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
    pub updated_at: DateTime<Utc>, // TIMESTAMPTZ
}

impl Event {
    /// The event's approval state as a gate value the state machine can act on.
    pub fn approval_gate(&self) -> DualApprovalGate {
        DualApprovalGate {
            tusc: self.tusc_approved,
            dsw: self.dsw_approved,
            finalized: self.final_approved,
        }
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum EventMode {
        Solo => "solo",
        Team => "team",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum EventCategory {
        Sports => "sports",
        Cultural => "cultural",
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub mode: EventMode,
    pub category: EventCategory,
}
