use chrono::Utc;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{EventCategory, MemberAffiliation, Team, TeamInput, TeamMembership},
    pool,
    utils::sql,
};

pub async fn create_team(
    tx: &mut Transaction<'_, Postgres>,
    input: TeamInput,
    created_by: Uuid,
) -> Result<Team, sqlx::Error> {
    let now = Utc::now();
    let team = sqlx::query_as::<_, Team>(&sql(r#"
            INSERT INTO
                teams (
                    name,
                    created_by,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                name,
                created_by,
                created_at,
                updated_at
        "#))
    .bind(input.name)
    .bind(created_by)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(team)
}

pub async fn get_team_by_id(id: Uuid) -> Result<Option<Team>, sqlx::Error> {
    let team = sqlx::query_as::<_, Team>(&sql(r#"
            SELECT
                id,
                name,
                created_by,
                created_at,
                updated_at
            FROM
                teams
            WHERE
                id = ?
        "#))
    .bind(id)
    .fetch_optional(pool())
    .await?;

    Ok(team)
}

pub async fn get_teams() -> Result<Vec<Team>, sqlx::Error> {
    let teams = sqlx::query_as::<_, Team>(&sql(r#"
            SELECT
                id,
                name,
                created_by,
                created_at,
                updated_at
            FROM
                teams
            ORDER BY
                name
        "#))
    .fetch_all(pool())
    .await?;

    Ok(teams)
}

pub async fn delete_team(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    let result = sqlx::query(&sql("DELETE FROM teams WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}

// Membership management

pub async fn add_member(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    student_id: Uuid,
    category: EventCategory,
) -> Result<TeamMembership, sqlx::Error> {
    let now = Utc::now();
    let membership = sqlx::query_as::<_, TeamMembership>(&sql(r#"
            INSERT INTO
                team_memberships (
                    team_id,
                    student_id,
                    category,
                    created_at
                )
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                team_id,
                student_id,
                category,
                created_at
        "#))
    .bind(team_id)
    .bind(student_id)
    .bind(category)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(membership)
}

pub async fn get_memberships(team_id: Uuid) -> Result<Vec<TeamMembership>, sqlx::Error> {
    let memberships = sqlx::query_as::<_, TeamMembership>(&sql(r#"
            SELECT
                id,
                team_id,
                student_id,
                category,
                created_at
            FROM
                team_memberships
            WHERE
                team_id = ?
            ORDER BY
                created_at
        "#))
    .bind(team_id)
    .fetch_all(pool())
    .await?;

    Ok(memberships)
}

/// Current members joined with their hostel affiliation, locked for the
/// duration of the surrounding transaction so a concurrent addition cannot
/// slip past the composition rules.
pub async fn member_affiliations_for_update(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> Result<Vec<MemberAffiliation>, sqlx::Error> {
    let affiliations = sqlx::query_as::<_, MemberAffiliation>(&sql(r#"
            SELECT
                tm.student_id,
                tm.category,
                s.hostel_id,
                h.gender AS hostel_gender
            FROM
                team_memberships tm
                INNER JOIN students s ON tm.student_id = s.id
                LEFT JOIN hostels h ON s.hostel_id = h.id
            WHERE
                tm.team_id = ?
            FOR UPDATE OF tm
        "#))
    .bind(team_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(affiliations)
}

/// The team's derived hostel: meaningful only when the sports roster names
/// exactly one hostel.
pub async fn derived_hostel(team_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let hostels = sqlx::query_scalar::<_, Option<Uuid>>(&sql(r#"
            SELECT DISTINCT
                s.hostel_id
            FROM
                team_memberships tm
                INNER JOIN students s ON tm.student_id = s.id
            WHERE
                tm.team_id = ?
                AND tm.category = 'sports'
        "#))
    .bind(team_id)
    .fetch_all(pool())
    .await?;

    Ok(match hostels.as_slice() {
        [Some(hostel_id)] => Some(*hostel_id),
        _ => None,
    })
}

pub async fn remove_member(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    student_id: Uuid,
) -> Result<Option<()>, sqlx::Error> {
    let result = sqlx::query(&sql(r#"
            DELETE FROM team_memberships
            WHERE
                team_id = ?
                AND student_id = ?
            "#))
    .bind(team_id)
    .bind(student_id)
    .execute(&mut **tx)
    .await?;

    Ok(if result.rows_affected() > 0 {
        Some(())
    } else {
        None
    })
}
