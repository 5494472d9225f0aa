use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{Role, User},
    pool,
    utils::sql,
};

pub async fn create_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password_hash: &str,
    name: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(&sql(r#"
            INSERT INTO
                users (
                    email,
                    password_hash,
                    name,
                    role,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                email,
                password_hash,
                name,
                role,
                created_at,
                updated_at
        "#))
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(user)
}

pub async fn find_by_email(email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&sql(r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                role,
                created_at,
                updated_at
            FROM
                users
            WHERE
                email = ?
        "#))
    .bind(email)
    .fetch_optional(pool())
    .await?;

    Ok(user)
}

pub async fn find_by_id(id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&sql(r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                role,
                created_at,
                updated_at
            FROM
                users
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(user)
}

pub async fn email_exists(email: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(&sql(
        "SELECT COUNT(*) FROM users WHERE email = ?",
    ))
    .bind(email)
    .fetch_one(pool())
    .await?;

    Ok(count > 0)
}
