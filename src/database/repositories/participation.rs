use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{Participation, Position, Subject},
    pool,
    utils::sql,
};

/// Insert a registration row. The partial unique indexes on
/// (event_id, user_id) and (event_id, team_id) are the authoritative
/// duplicate check; callers translate the unique-violation error.
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    subject: Subject,
    hostel_id: Option<Uuid>,
) -> Result<Participation, sqlx::Error> {
    let now = Utc::now();
    let participation = sqlx::query_as::<_, Participation>(&sql(r#"
            INSERT INTO
                participations (
                    event_id,
                    user_id,
                    team_id,
                    hostel_id,
                    position,
                    score,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                event_id,
                user_id,
                team_id,
                hostel_id,
                position,
                score,
                created_at,
                updated_at
        "#))
    .bind(event_id)
    .bind(subject.user_id())
    .bind(subject.team_id())
    .bind(hostel_id)
    .bind(Position::default())
    .bind(0i64)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(participation)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Participation>, sqlx::Error> {
    let participation = sqlx::query_as::<_, Participation>(&sql(r#"
            SELECT
                id,
                event_id,
                user_id,
                team_id,
                hostel_id,
                position,
                score,
                created_at,
                updated_at
            FROM
                participations
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(participation)
}

pub async fn get_by_event(event_id: Uuid) -> Result<Vec<Participation>, sqlx::Error> {
    let participations = sqlx::query_as::<_, Participation>(&sql(r#"
            SELECT
                id,
                event_id,
                user_id,
                team_id,
                hostel_id,
                position,
                score,
                created_at,
                updated_at
            FROM
                participations
            WHERE
                event_id = ?
            ORDER BY
                created_at
        "#))
    .bind(event_id)
    .fetch_all(pool())
    .await?;

    Ok(participations)
}

/// Advisory fast-path check; the unique indexes remain the arbiter under
/// concurrency.
pub async fn exists_for_subject(event_id: Uuid, subject: Subject) -> Result<bool, sqlx::Error> {
    let count = match subject {
        Subject::User(user_id) => {
            sqlx::query_scalar::<_, i64>(&sql(
                "SELECT COUNT(*) FROM participations WHERE event_id = ? AND user_id = ?",
            ))
            .bind(event_id)
            .bind(user_id)
            .fetch_one(pool())
            .await?
        }
        Subject::Team(team_id) => {
            sqlx::query_scalar::<_, i64>(&sql(
                "SELECT COUNT(*) FROM participations WHERE event_id = ? AND team_id = ?",
            ))
            .bind(event_id)
            .bind(team_id)
            .fetch_one(pool())
            .await?
        }
    };

    Ok(count > 0)
}

pub async fn update_result(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    position: Position,
    score: i64,
) -> Result<Option<Participation>, sqlx::Error> {
    let now = Utc::now();
    let participation = sqlx::query_as::<_, Participation>(&sql(r#"
            UPDATE
                participations
            SET
                position = ?,
                score = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                event_id,
                user_id,
                team_id,
                hostel_id,
                position,
                score,
                created_at,
                updated_at
        "#))
    .bind(position)
    .bind(score)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(participation)
}

pub async fn delete(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    let result = sqlx::query(&sql("DELETE FROM participations WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}
