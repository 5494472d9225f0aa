use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{Event, EventCategory, EventInput, EventMode},
    pool,
    utils::sql,
};
use crate::services::approval::DualApprovalGate;

pub async fn create_event(
    tx: &mut Transaction<'_, Postgres>,
    input: EventInput,
    created_by: Uuid,
) -> Result<Event, sqlx::Error> {
    let now = Utc::now();
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            INSERT INTO
                events (
                    name,
                    description,
                    event_date,
                    mode,
                    category,
                    created_by,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                description,
                event_date,
                mode,
                category,
                tusc_approved,
                dsw_approved,
                final_approved,
                created_by,
                created_at,
                updated_at
        "#))
    .bind(input.name)
    .bind(input.description)
    .bind(input.event_date)
    .bind(input.mode)
    .bind(input.category)
    .bind(created_by)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(event)
}

pub async fn get_event_by_id(id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            SELECT
                id,
                name,
                description,
                event_date,
                mode,
                category,
                tusc_approved,
                dsw_approved,
                final_approved,
                created_by,
                created_at,
                updated_at
            FROM
                events
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(event)
}

pub async fn get_events(
    category: Option<EventCategory>,
    mode: Option<EventMode>,
) -> Result<Vec<Event>, sqlx::Error> {
    let mut query = r#"
        SELECT
            id,
            name,
            description,
            event_date,
            mode,
            category,
            tusc_approved,
            dsw_approved,
            final_approved,
            created_by,
            created_at,
            updated_at
        FROM
            events
        "#
    .to_string();

    let mut conditions = vec![];
    let mut params: Vec<String> = Vec::new();

    if let Some(c) = category {
        conditions.push(format!("category = ${}", params.len() + 1));
        params.push(c.to_string());
    }

    if let Some(m) = mode {
        conditions.push(format!("mode = ${}", params.len() + 1));
        params.push(m.to_string());
    }

    if !conditions.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }

    query.push_str(" ORDER BY event_date, name");

    let mut prepared = sqlx::query_as::<_, Event>(&query);
    for param in params {
        prepared = prepared.bind(param);
    }

    let events = prepared.fetch_all(pool()).await?;

    Ok(events)
}

/// Events whose results are publicly visible, grouped the way the public
/// listing presents them.
pub async fn get_finalized_events() -> Result<Vec<Event>, sqlx::Error> {
    let events = sqlx::query_as::<_, Event>(&sql(r#"
            SELECT
                id,
                name,
                description,
                event_date,
                mode,
                category,
                tusc_approved,
                dsw_approved,
                final_approved,
                created_by,
                created_at,
                updated_at
            FROM
                events
            WHERE
                final_approved = TRUE
            ORDER BY
                category,
                mode,
                event_date,
                name
        "#))
    .fetch_all(pool())
    .await?;

    Ok(events)
}

pub async fn update_event(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    input: EventInput,
) -> Result<Option<Event>, sqlx::Error> {
    let now = Utc::now();
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            UPDATE
                events
            SET
                name = ?,
                description = ?,
                event_date = ?,
                mode = ?,
                category = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                description,
                event_date,
                mode,
                category,
                tusc_approved,
                dsw_approved,
                final_approved,
                created_by,
                created_at,
                updated_at
        "#))
    .bind(input.name)
    .bind(input.description)
    .bind(input.event_date)
    .bind(input.mode)
    .bind(input.category)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(event)
}

/// Persist an approval-gate transition. The gate value is computed by the
/// state machine; this writes all three flags in one statement so the
/// `events_final_requires_both` constraint always sees a consistent row.
pub async fn set_approval_state(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    gate: DualApprovalGate,
) -> Result<Option<Event>, sqlx::Error> {
    let now = Utc::now();
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            UPDATE
                events
            SET
                tusc_approved = ?,
                dsw_approved = ?,
                final_approved = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                description,
                event_date,
                mode,
                category,
                tusc_approved,
                dsw_approved,
                final_approved,
                created_by,
                created_at,
                updated_at
        "#))
    .bind(gate.tusc)
    .bind(gate.dsw)
    .bind(gate.finalized)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(event)
}

pub async fn delete_event(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    // participations and event_scores cascade with the event row
    let result = sqlx::query(&sql("DELETE FROM events WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}
