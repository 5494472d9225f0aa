use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{EventScore, EventScoreInput, EventScoreUpdateInput},
    pool,
    utils::sql,
};
use crate::services::approval::DualApprovalGate;

pub async fn create_score(
    tx: &mut Transaction<'_, Postgres>,
    input: EventScoreInput,
) -> Result<EventScore, sqlx::Error> {
    let now = Utc::now();
    let score = sqlx::query_as::<_, EventScore>(&sql(r#"
            INSERT INTO
                event_scores (
                    event_id,
                    hostel_id,
                    user_id,
                    team_id,
                    score,
                    remarks,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                event_id,
                hostel_id,
                user_id,
                team_id,
                score,
                remarks,
                result_verified_by_tusc,
                result_verified_by_dsw,
                created_at,
                updated_at
        "#))
    .bind(input.event_id)
    .bind(input.hostel_id)
    .bind(input.user_id)
    .bind(input.team_id)
    .bind(input.score)
    .bind(input.remarks)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(score)
}

pub async fn get_score_by_id(id: Uuid) -> Result<Option<EventScore>, sqlx::Error> {
    let score = sqlx::query_as::<_, EventScore>(&sql(r#"
            SELECT
                id,
                event_id,
                hostel_id,
                user_id,
                team_id,
                score,
                remarks,
                result_verified_by_tusc,
                result_verified_by_dsw,
                created_at,
                updated_at
            FROM
                event_scores
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(score)
}

pub async fn get_scores_by_event(event_id: Uuid) -> Result<Vec<EventScore>, sqlx::Error> {
    let scores = sqlx::query_as::<_, EventScore>(&sql(r#"
            SELECT
                id,
                event_id,
                hostel_id,
                user_id,
                team_id,
                score,
                remarks,
                result_verified_by_tusc,
                result_verified_by_dsw,
                created_at,
                updated_at
            FROM
                event_scores
            WHERE
                event_id = ?
            ORDER BY
                score DESC
        "#))
    .bind(event_id)
    .fetch_all(pool())
    .await?;

    Ok(scores)
}

pub async fn update_score(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    input: EventScoreUpdateInput,
) -> Result<Option<EventScore>, sqlx::Error> {
    let now = Utc::now();
    let score = sqlx::query_as::<_, EventScore>(&sql(r#"
            UPDATE
                event_scores
            SET
                score = ?,
                remarks = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                event_id,
                hostel_id,
                user_id,
                team_id,
                score,
                remarks,
                result_verified_by_tusc,
                result_verified_by_dsw,
                created_at,
                updated_at
        "#))
    .bind(input.score)
    .bind(input.remarks)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(score)
}

/// Persist a verification-gate transition for a score record.
pub async fn set_verification_state(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    gate: DualApprovalGate,
) -> Result<Option<EventScore>, sqlx::Error> {
    let now = Utc::now();
    let score = sqlx::query_as::<_, EventScore>(&sql(r#"
            UPDATE
                event_scores
            SET
                result_verified_by_tusc = ?,
                result_verified_by_dsw = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                event_id,
                hostel_id,
                user_id,
                team_id,
                score,
                remarks,
                result_verified_by_tusc,
                result_verified_by_dsw,
                created_at,
                updated_at
        "#))
    .bind(gate.tusc)
    .bind(gate.dsw)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(score)
}

pub async fn delete_score(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    let result = sqlx::query(&sql("DELETE FROM event_scores WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}
