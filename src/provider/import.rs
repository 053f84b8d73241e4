//! Ratings import from tabular text
//!
//! Accepts comma-separated tables with a header row. Column names are matched
//! case-insensitively and tolerate the two spellings seen in exported rating
//! sheets: team_name/team and elo/rating. Malformed rows are skipped, never
//! fatal: one bad line must not abort a batch import.

/// Parse (team, rating) pairs out of a ratings table.
///
/// Returns an empty vector when the header lacks the required columns.
pub fn parse_ratings_table(text: &str) -> Vec<(String, f64)> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return vec![];
    };

    let columns: Vec<String> = split_row(header)
        .into_iter()
        .map(|c| c.to_lowercase())
        .collect();
    let team_idx = columns.iter().position(|c| c == "team_name" || c == "team");
    let rating_idx = columns.iter().position(|c| c == "elo" || c == "rating");
    let (Some(team_idx), Some(rating_idx)) = (team_idx, rating_idx) else {
        return vec![];
    };

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line);
        let Some(team) = fields.get(team_idx).filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(rating) = fields.get(rating_idx).and_then(|r| r.parse::<f64>().ok()) else {
            continue;
        };
        rows.push((team.clone(), rating));
    }
    rows
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_team_and_elo_columns() {
        let table = "team_name,elo\nBoston Celtics,1612.5\nLAL,1540\n";
        let rows = parse_ratings_table(table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("Boston Celtics".to_string(), 1612.5));
        assert_eq!(rows[1], ("LAL".to_string(), 1540.0));
    }

    #[test]
    fn test_alternate_column_spellings() {
        let table = "team,rating\nArsenal,1520\n";
        let rows = parse_ratings_table(table);
        assert_eq!(rows, vec![("Arsenal".to_string(), 1520.0)]);
    }

    #[test]
    fn test_extra_columns_and_quoting() {
        let table = "rank,\"team_name\",conference,\"elo\"\n1,\"Boston Celtics\",East,1612.5\n";
        let rows = parse_ratings_table(table);
        assert_eq!(rows, vec![("Boston Celtics".to_string(), 1612.5)]);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let table = "team_name,elo\n\
                     Boston Celtics,1612.5\n\
                     ,1500\n\
                     Miami Heat,not-a-number\n\
                     Denver Nuggets\n\
                     \n\
                     Phoenix Suns,1488\n";
        let rows = parse_ratings_table(table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "Boston Celtics");
        assert_eq!(rows[1].0, "Phoenix Suns");
    }

    #[test]
    fn test_missing_columns_yield_nothing() {
        assert!(parse_ratings_table("club,points\nArsenal,1520\n").is_empty());
        assert!(parse_ratings_table("").is_empty());
    }
}
