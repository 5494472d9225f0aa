use regex::Regex;

/// Collapse whitespace and rewrite `?` placeholders into the `$1, $2, ...`
/// form Postgres expects, so query bodies stay readable in the repositories.
pub fn sql(query: &str) -> String {
    let cleaned = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let placeholder = Regex::new(r"\?").unwrap();

    let mut result = cleaned;
    let mut param_index = 0;
    while let Some(mat) = placeholder.find(&result) {
        param_index += 1;
        result.replace_range(mat.range(), &format!("${}", param_index));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_placeholders_in_order() {
        assert_eq!(
            sql("INSERT INTO t (a, b) VALUES (?, ?)"),
            "INSERT INTO t (a, b) VALUES ($1, $2)"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            sql("SELECT\n    id\nFROM\n    events\nWHERE\n    id = ?"),
            "SELECT id FROM events WHERE id = $1"
        );
    }

    #[test]
    fn leaves_queries_without_placeholders_alone() {
        assert_eq!(sql("SELECT 1"), "SELECT 1");
    }
}
