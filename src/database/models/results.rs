use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::event::{EventCategory, EventMode};

/// One line of a published result table. `position` stays a plain string on
/// the read side so historical rows with retired labels still render (they
/// sort after `participant`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub participation_id: Uuid,
    pub participant_name: String,
    pub hostel: Option<String>,
    pub position: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResults {
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub mode: EventMode,
    pub category: EventCategory,
    pub standings: Vec<StandingRow>,
}
