use uuid::Uuid;

use crate::database::{models::StandingRow, pool, utils::sql};

/// Raw result rows for one event: each participation resolved to a display
/// name (the user's name for solo rows, the team's name for team rows) and a
/// hostel name where one is on record. Ordering is applied by the ranking
/// engine, not here.
pub async fn standing_rows(event_id: Uuid) -> Result<Vec<StandingRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, StandingRow>(&sql(r#"
            SELECT
                p.id AS participation_id,
                COALESCE(u.name, t.name, 'Unknown') AS participant_name,
                h.name AS hostel,
                p.position,
                p.score
            FROM
                participations p
                LEFT JOIN users u ON p.user_id = u.id
                LEFT JOIN teams t ON p.team_id = t.id
                LEFT JOIN hostels h ON p.hostel_id = h.id
            WHERE
                p.event_id = ?
        "#))
    .bind(event_id)
    .fetch_all(pool())
    .await?;

    Ok(rows)
}
