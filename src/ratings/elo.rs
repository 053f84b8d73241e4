//! Elo expected-score and update formulas
//!
//! Ratings live in f64 space because the logistic needs 10^x.

/// Standard Elo expected score for A against B.
///
/// Always in the open interval (0, 1), and `expected_score(a, b) +
/// expected_score(b, a) == 1`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// A completed result from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    /// Derive the outcome from a final score.
    pub fn from_scores(home_score: i64, away_score: i64) -> Self {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Actual score for the home team: 1 for a win, 0.5 for a draw, 0 for a
    /// loss. The away score is the complement.
    pub fn home_score(&self) -> f64 {
        match self {
            MatchOutcome::HomeWin => 1.0,
            MatchOutcome::Draw => 0.5,
            MatchOutcome::AwayWin => 0.0,
        }
    }
}

/// Apply one Elo update after a result.
///
/// `home_adv` is baked into the expected score in Elo points (pass 0 to rate
/// on raw strength). Both sides update independently from the pre-game
/// ratings, so the order of writes cannot matter.
pub fn update(
    r_home: f64,
    r_away: f64,
    outcome: MatchOutcome,
    k: f64,
    home_adv: f64,
) -> (f64, f64) {
    let e_home = expected_score(r_home + home_adv, r_away);
    let s_home = outcome.home_score();

    let new_home = r_home + k * (s_home - e_home);
    let new_away = r_away + k * ((1.0 - s_home) - (1.0 - e_home));
    (new_home, new_away)
}
