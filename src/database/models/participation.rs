use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub hostel_id: Option<Uuid>,
    pub position: Position,
    pub score: i64,
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
    pub updated_at: DateTime<Utc>, // TIMESTAMPTZ
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    pub enum Position {
        #[serde(rename = "1st")]
        First => "1st",
        #[serde(rename = "2nd")]
        Second => "2nd",
        #[serde(rename = "3rd")]
        Third => "3rd",
        #[serde(rename = "participant")]
        Participant => "participant",
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Participant
    }
}

/// The subject of a registration. Exactly one of user/team, by construction;
/// the two-nullable-column shape exists only on the wire and in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    User(Uuid),
    Team(Uuid),
}

impl Subject {
    pub fn from_parts(user_id: Option<Uuid>, team_id: Option<Uuid>) -> Result<Self, AppError> {
        match (user_id, team_id) {
            (Some(user_id), None) => Ok(Subject::User(user_id)),
            (None, Some(team_id)) => Ok(Subject::Team(team_id)),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "Provide either userId or teamId, not both".to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "Provide either userId or teamId".to_string(),
            )),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Subject::User(id) => Some(*id),
            Subject::Team(_) => None,
        }
    }

    pub fn team_id(&self) -> Option<Uuid> {
        match self {
            Subject::Team(id) => Some(*id),
            Subject::User(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultUpdateInput {
    pub position: Position,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn subject_from_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            Subject::from_parts(Some(id), None).unwrap(),
            Subject::User(id)
        );
    }

    #[test]
    fn subject_from_team_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            Subject::from_parts(None, Some(id)).unwrap(),
            Subject::Team(id)
        );
    }

    #[test]
    fn subject_rejects_both() {
        let err = Subject::from_parts(Some(Uuid::new_v4()), Some(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn subject_rejects_neither() {
        let err = Subject::from_parts(None, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
