use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::models::{Event, EventMode, Participation, Role, Subject};
use crate::database::repositories::{participation as participation_repo, student as student_repo, team as team_repo};
use crate::error::AppError;
use crate::services::permissions::{self, Action};

/// Register a subject for an event: validate mode agreement and caller
/// authority, derive the hostel affiliation, and insert the participation
/// row. Runs inside the caller's transaction; the partial unique indexes on
/// participations are the final word on duplicates, the existence checks
/// here only give the common case a friendly error before the insert.
pub async fn register(
    tx: &mut Transaction<'_, Postgres>,
    event: &Event,
    subject: Subject,
    caller_id: Uuid,
    caller_role: Role,
) -> Result<Participation, AppError> {
    check_mode_agreement(event.mode, subject)?;

    let hostel_id = match subject {
        Subject::User(user_id) => {
            if user_id != caller_id && !permissions::is_allowed(caller_role, Action::RegisterOnBehalf)
            {
                return Err(AppError::PermissionDenied(
                    "Cannot register another user for an event".to_string(),
                ));
            }

            let student = student_repo::find_by_user_id(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Validation("User has no student profile".to_string())
                })?;

            student.hostel_id
        }
        Subject::Team(team_id) => {
            team_repo::get_team_by_id(team_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

            team_repo::derived_hostel(team_id).await?
        }
    };

    if participation_repo::exists_for_subject(event.id, subject).await? {
        return Err(already_registered());
    }

    participation_repo::insert(tx, event.id, subject, hostel_id)
        .await
        .map_err(|err| match &err {
            // lost the race after the advisory check passed; same outcome
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => already_registered(),
            _ => AppError::from(err),
        })
}

fn check_mode_agreement(mode: EventMode, subject: Subject) -> Result<(), AppError> {
    match (mode, subject) {
        (EventMode::Solo, Subject::User(_)) | (EventMode::Team, Subject::Team(_)) => Ok(()),
        (EventMode::Solo, Subject::Team(_)) => Err(AppError::Validation(
            "Solo events accept individual registrations only".to_string(),
        )),
        (EventMode::Team, Subject::User(_)) => Err(AppError::Validation(
            "Team events accept team registrations only".to_string(),
        )),
    }
}

fn already_registered() -> AppError {
    AppError::Conflict("Already registered for this event".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_events_take_user_subjects() {
        check_mode_agreement(EventMode::Solo, Subject::User(Uuid::new_v4())).unwrap();

        let err =
            check_mode_agreement(EventMode::Solo, Subject::Team(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn team_events_take_team_subjects() {
        check_mode_agreement(EventMode::Team, Subject::Team(Uuid::new_v4())).unwrap();

        let err =
            check_mode_agreement(EventMode::Team, Subject::User(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
