//! Canonical team names
//!
//! Ratings are keyed by a single canonical string per real-world team. Input
//! names are whitespace-normalized and matched case-insensitively against a
//! static alias table (full names, abbreviations, nicknames). Names the table
//! does not know pass through unchanged and act as their own canonical form.

use std::collections::HashMap;
use std::sync::LazyLock;

static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Common name variants
        ("la lakers", "Los Angeles Lakers"),
        ("la clippers", "Los Angeles Clippers"),
        ("gs warriors", "Golden State Warriors"),
        ("ny knicks", "New York Knicks"),
        ("no pelicans", "New Orleans Pelicans"),
        ("new orleans", "New Orleans Pelicans"),
        ("new orleans pelicans", "New Orleans Pelicans"),
        ("pelicans", "New Orleans Pelicans"),
        ("nola", "New Orleans Pelicans"),
        ("76ers", "Philadelphia 76ers"),
        ("sixers", "Philadelphia 76ers"),
        ("philadelphia", "Philadelphia 76ers"),
        ("philadelphia 76ers", "Philadelphia 76ers"),
        ("spurs", "San Antonio Spurs"),
        ("lakers", "Los Angeles Lakers"),
        ("clippers", "Los Angeles Clippers"),
        ("warriors", "Golden State Warriors"),
        ("thunder", "Oklahoma City Thunder"),
        ("knicks", "New York Knicks"),
        ("suns", "Phoenix Suns"),
        ("blazers", "Portland Trail Blazers"),
        ("trail blazers", "Portland Trail Blazers"),
        ("wolves", "Minnesota Timberwolves"),
        ("timberwolves", "Minnesota Timberwolves"),
        ("cavs", "Cleveland Cavaliers"),
        ("mavs", "Dallas Mavericks"),
        // Abbreviations
        ("atl", "Atlanta Hawks"),
        ("bos", "Boston Celtics"),
        ("brk", "Brooklyn Nets"),
        ("bkn", "Brooklyn Nets"),
        ("chi", "Chicago Bulls"),
        ("cho", "Charlotte Hornets"),
        ("cha", "Charlotte Hornets"),
        ("cle", "Cleveland Cavaliers"),
        ("dal", "Dallas Mavericks"),
        ("den", "Denver Nuggets"),
        ("det", "Detroit Pistons"),
        ("gsw", "Golden State Warriors"),
        ("hou", "Houston Rockets"),
        ("ind", "Indiana Pacers"),
        ("lac", "Los Angeles Clippers"),
        ("lal", "Los Angeles Lakers"),
        ("mem", "Memphis Grizzlies"),
        ("mia", "Miami Heat"),
        ("mil", "Milwaukee Bucks"),
        ("min", "Minnesota Timberwolves"),
        ("nop", "New Orleans Pelicans"),
        ("no", "New Orleans Pelicans"),
        ("nor", "New Orleans Pelicans"),
        ("nyk", "New York Knicks"),
        ("okc", "Oklahoma City Thunder"),
        ("orl", "Orlando Magic"),
        ("phi", "Philadelphia 76ers"),
        ("pho", "Phoenix Suns"),
        ("phx", "Phoenix Suns"),
        ("por", "Portland Trail Blazers"),
        ("sac", "Sacramento Kings"),
        ("sas", "San Antonio Spurs"),
        ("tor", "Toronto Raptors"),
        ("uta", "Utah Jazz"),
        ("was", "Washington Wizards"),
    ])
});

/// Resolve a team name to its canonical form.
///
/// Must be applied at every rating read/write and at persistence boundaries;
/// otherwise ratings for the same team fork under different spellings.
pub fn canonical_team_name(name: &str) -> String {
    let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
    match ALIASES.get(normalized.to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_passes_through() {
        assert_eq!(canonical_team_name("Boston Celtics"), "Boston Celtics");
    }

    #[test]
    fn test_abbreviation_resolves() {
        assert_eq!(canonical_team_name("BOS"), "Boston Celtics");
        assert_eq!(canonical_team_name("lal"), "Los Angeles Lakers");
    }

    #[test]
    fn test_nickname_resolves() {
        assert_eq!(canonical_team_name("Sixers"), "Philadelphia 76ers");
        assert_eq!(canonical_team_name("trail blazers"), "Portland Trail Blazers");
    }

    #[test]
    fn test_whitespace_normalized() {
        assert_eq!(canonical_team_name("  la   lakers "), "Los Angeles Lakers");
        assert_eq!(canonical_team_name(" Arsenal  FC "), "Arsenal FC");
    }

    #[test]
    fn test_unknown_name_is_its_own_canonical_form() {
        assert_eq!(canonical_team_name("Real Madrid"), "Real Madrid");
        assert_eq!(canonical_team_name(""), "");
    }
}
