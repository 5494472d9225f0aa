use std::cmp::Reverse;

use crate::database::models::StandingRow;

/// Sort weight of a stored position label: podium places first, then plain
/// participants, then anything unrecognized (retired labels from older
/// seasons sort last rather than failing the projection).
fn position_rank(position: &str) -> u8 {
    match position {
        "1st" => 0,
        "2nd" => 1,
        "3rd" => 2,
        "participant" => 3,
        _ => 4,
    }
}

/// Order result rows for public display: position rank ascending, score
/// descending within the same position. The sort is stable, so equally
/// placed, equally scored rows keep their fetch order and repeated calls
/// render identically.
pub fn rank_standings(rows: &mut [StandingRow]) {
    rows.sort_by_key(|row| (position_rank(&row.position), Reverse(row.score)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn row(name: &str, position: &str, score: i64) -> StandingRow {
        StandingRow {
            participation_id: Uuid::new_v4(),
            participant_name: name.to_string(),
            hostel: None,
            position: position.to_string(),
            score,
        }
    }

    fn names(rows: &[StandingRow]) -> Vec<&str> {
        rows.iter().map(|r| r.participant_name.as_str()).collect()
    }

    #[test]
    fn position_outranks_score() {
        let mut rows = vec![
            row("A", "1st", 10),
            row("B", "participant", 99),
            row("C", "1st", 20),
        ];
        rank_standings(&mut rows);
        assert_eq!(names(&rows), vec!["C", "A", "B"]);
    }

    #[test]
    fn podium_order_is_first_second_third() {
        let mut rows = vec![
            row("bronze", "3rd", 50),
            row("gold", "1st", 10),
            row("silver", "2nd", 30),
        ];
        rank_standings(&mut rows);
        assert_eq!(names(&rows), vec!["gold", "silver", "bronze"]);
    }

    #[test]
    fn unrecognized_positions_sort_last() {
        let mut rows = vec![
            row("legacy", "honourable_mention", 500),
            row("also-ran", "participant", 0),
            row("winner", "1st", 1),
        ];
        rank_standings(&mut rows);
        assert_eq!(names(&rows), vec!["winner", "also-ran", "legacy"]);
    }

    #[test]
    fn equal_rows_keep_their_incoming_order() {
        let mut rows = vec![
            row("first-in", "participant", 10),
            row("second-in", "participant", 10),
        ];
        rank_standings(&mut rows);
        assert_eq!(names(&rows), vec!["first-in", "second-in"]);
    }
}
