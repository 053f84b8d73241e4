//! Game results provider
//!
//! Fetches a day's games from the results API and maps them to plain
//! `GameRecord`s. Only records whose status reads as final may drive rating
//! updates; callers filter on `is_final()`.

use crate::config::ProviderConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// A completed (or in-progress) game as reported by the provider.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i64,
    pub away_score: i64,
    pub status: String,
}

impl GameRecord {
    /// Whether the status marks this game as finished.
    pub fn is_final(&self) -> bool {
        is_final_status(&self.status)
    }
}

/// Interpret a provider status string as "final".
///
/// Accepts an exact "final" or a "final/..." qualifier (overtime etc.),
/// case-insensitively. Anything else (scheduled times, "in progress",
/// quarter markers) is not a completed result.
pub fn is_final_status(status: &str) -> bool {
    let s = status.trim().to_lowercase();
    s == "final" || s.starts_with("final/")
}

#[derive(Debug, Deserialize)]
struct GamesResponse {
    data: Vec<ApiGame>,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    date: String,
    status: String,
    home_team: TeamRef,
    visitor_team: TeamRef,
    #[serde(default)]
    home_team_score: i64,
    #[serde(default)]
    visitor_team_score: i64,
}

#[derive(Debug, Deserialize)]
struct TeamRef {
    full_name: String,
}

/// Blocking client for the results API.
pub struct ResultsClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl ResultsClient {
    /// Build a client from configuration.
    ///
    /// The API key comes from config or the RESULTS_API_KEY environment
    /// variable; a missing key is a configuration error, not a silent skip.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => match std::env::var("RESULTS_API_KEY") {
                Ok(key) => key,
                Err(_) => bail!("missing results API key: set provider.api_key or RESULTS_API_KEY"),
            },
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// All games on `date` (YYYY-MM-DD).
    pub fn games_on(&self, date: &str) -> Result<Vec<GameRecord>> {
        let url = format!("{}/v1/games", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("dates[]", date), ("per_page", "100")])
            .send()
            .with_context(|| format!("fetching games for {date}"))?
            .error_for_status()
            .context("results API returned an error status")?;

        let body: GamesResponse = response.json().context("decoding games response")?;
        Ok(body
            .data
            .into_iter()
            .map(|game| GameRecord {
                date: game.date,
                home_team: game.home_team.full_name,
                away_team: game.visitor_team.full_name,
                home_score: game.home_team_score,
                away_score: game.visitor_team_score,
                status: game.status,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_status_exact() {
        assert!(is_final_status("Final"));
        assert!(is_final_status("final"));
        assert!(is_final_status("  FINAL "));
    }

    #[test]
    fn test_final_status_with_qualifier() {
        assert!(is_final_status("Final/OT"));
        assert!(is_final_status("final/2OT"));
    }

    #[test]
    fn test_non_final_statuses_rejected() {
        assert!(!is_final_status("In Progress"));
        assert!(!is_final_status("7:30 PM ET"));
        assert!(!is_final_status("Half"));
        assert!(!is_final_status("Finally")); // prefix alone is not enough
        assert!(!is_final_status(""));
    }

    #[test]
    fn test_games_response_decoding() {
        let json = r#"{
            "data": [{
                "date": "2025-01-15",
                "status": "Final",
                "home_team": {"full_name": "Boston Celtics"},
                "visitor_team": {"full_name": "Los Angeles Lakers"},
                "home_team_score": 112,
                "visitor_team_score": 104
            }]
        }"#;

        let parsed: GamesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].home_team.full_name, "Boston Celtics");
        assert_eq!(parsed.data[0].home_team_score, 112);
    }
}
