use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{Hostel, HostelInput},
    pool,
    utils::sql,
};

pub async fn create_hostel(
    tx: &mut Transaction<'_, Postgres>,
    input: HostelInput,
) -> Result<Hostel, sqlx::Error> {
    let now = Utc::now();
    let hostel = sqlx::query_as::<_, Hostel>(&sql(r#"
            INSERT INTO
                hostels (
                    name,
                    gender,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                name,
                gender,
                created_at,
                updated_at
        "#))
    .bind(input.name)
    .bind(input.gender)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(hostel)
}

pub async fn get_hostel_by_id(id: Uuid) -> Result<Option<Hostel>, sqlx::Error> {
    let hostel = sqlx::query_as::<_, Hostel>(&sql(r#"
            SELECT
                id,
                name,
                gender,
                created_at,
                updated_at
            FROM
                hostels
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(hostel)
}

pub async fn get_hostels() -> Result<Vec<Hostel>, sqlx::Error> {
    let hostels = sqlx::query_as::<_, Hostel>(&sql(r#"
            SELECT
                id,
                name,
                gender,
                created_at,
                updated_at
            FROM
                hostels
            ORDER BY
                name
        "#))
    .fetch_all(pool())
    .await?;

    Ok(hostels)
}

pub async fn update_hostel(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    input: HostelInput,
) -> Result<Option<Hostel>, sqlx::Error> {
    let now = Utc::now();
    let hostel = sqlx::query_as::<_, Hostel>(&sql(r#"
            UPDATE
                hostels
            SET
                name = ?,
                gender = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                gender,
                created_at,
                updated_at
        "#))
    .bind(input.name)
    .bind(input.gender)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(hostel)
}

pub async fn delete_hostel(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    let result = sqlx::query(&sql("DELETE FROM hostels WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}
