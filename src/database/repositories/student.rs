use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{Student, StudentInput},
    pool,
    utils::sql,
};

pub async fn create_student(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    input: StudentInput,
) -> Result<Student, sqlx::Error> {
    let now = Utc::now();
    let student = sqlx::query_as::<_, Student>(&sql(r#"
            INSERT INTO
                students (
                    user_id,
                    roll_number,
                    hostel_id,
                    gender,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                user_id,
                roll_number,
                hostel_id,
                gender,
                created_at,
                updated_at
        "#))
    .bind(user_id)
    .bind(input.roll_number)
    .bind(input.hostel_id)
    .bind(input.gender)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(student)
}

pub async fn find_by_id(id: Uuid) -> Result<Option<Student>, sqlx::Error> {
    let student = sqlx::query_as::<_, Student>(&sql(r#"
            SELECT
                id,
                user_id,
                roll_number,
                hostel_id,
                gender,
                created_at,
                updated_at
            FROM
                students
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(student)
}

pub async fn find_by_user_id(user_id: Uuid) -> Result<Option<Student>, sqlx::Error> {
    let student = sqlx::query_as::<_, Student>(&sql(r#"
            SELECT
                id,
                user_id,
                roll_number,
                hostel_id,
                gender,
                created_at,
                updated_at
            FROM
                students
            WHERE
                user_id = ?
        "#))
    .bind(user_id)
    .fetch_optional(pool())
    .await?;

    Ok(student)
}

pub async fn update_hostel_affiliation(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    hostel_id: Option<Uuid>,
) -> Result<Option<Student>, sqlx::Error> {
    let now = Utc::now();
    let student = sqlx::query_as::<_, Student>(&sql(r#"
            UPDATE
                students
            SET
                hostel_id = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                user_id,
                roll_number,
                hostel_id,
                gender,
                created_at,
                updated_at
        "#))
    .bind(hostel_id)
    .bind(now)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(student)
}
