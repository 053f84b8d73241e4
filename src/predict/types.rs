//! Prediction types

use serde::{Deserialize, Serialize};

/// Sport shape: determines which outcome set and model config apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    /// 2-way market, no draw
    Basketball,
    /// 3-way market with draws
    Soccer,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Soccer => "soccer",
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basketball" => Ok(Sport::Basketball),
            "soccer" => Ok(Sport::Soccer),
            other => Err(format!("unknown sport: {other}")),
        }
    }
}

/// A bettable outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Outcome::Home),
            "draw" => Ok(Outcome::Draw),
            "away" => Ok(Outcome::Away),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// Context for one 2-way game prediction; consumed per call, never persisted.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub home_team: String,
    pub away_team: String,
    /// Extra rest days the home team has over the away team (may be negative)
    pub rest_diff: i32,
    /// Home team plays the second night of a back-to-back
    pub home_b2b: bool,
    pub away_b2b: bool,
    /// Star player flagged out
    pub home_star_out: bool,
    pub away_star_out: bool,
}

impl GameContext {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            rest_diff: 0,
            home_b2b: false,
            away_b2b: false,
            home_star_out: false,
            away_star_out: false,
        }
    }
}

/// Context for one 3-way match prediction.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub home_team: String,
    pub away_team: String,
    /// Recent form score, roughly -1..1
    pub home_form: f64,
    pub away_form: f64,
    /// Season goal difference per side
    pub home_goal_diff: i64,
    pub away_goal_diff: i64,
}

impl MatchContext {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_form: 0.0,
            away_form: 0.0,
            home_goal_diff: 0,
            away_goal_diff: 0,
        }
    }
}

/// Opt-in diagnostics returned alongside a prediction.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingDiagnostics {
    /// Base ratings before adjustment
    pub home_rating: f64,
    pub away_rating: f64,
    /// Ratings after all Elo-point adjustments
    pub adj_home_rating: f64,
    pub adj_away_rating: f64,
    /// Adjusted rating gap (home - away)
    pub elo_diff: f64,
    /// Raw logistic home-win expectation before clamping and calibration
    pub raw_home_win_prob: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_round_trip() {
        assert_eq!("basketball".parse::<Sport>().unwrap(), Sport::Basketball);
        assert_eq!(Sport::Soccer.as_str(), "soccer");
        assert!("cricket".parse::<Sport>().is_err());
    }

    #[test]
    fn test_outcome_round_trip() {
        for outcome in [Outcome::Home, Outcome::Draw, Outcome::Away] {
            assert_eq!(outcome.as_str().parse::<Outcome>().unwrap(), outcome);
        }
        assert!("both".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_game_context_defaults() {
        let ctx = GameContext::new("BOS", "LAL");
        assert_eq!(ctx.rest_diff, 0);
        assert!(!ctx.home_b2b);
        assert!(!ctx.away_star_out);
    }
}
