//! 3-way outcome predictor
//!
//! The home-win expectation comes from the same adjusted-rating logistic as
//! the 2-way model; it is then split into home/draw/away around a baseline
//! draw probability. The split constants are empirically tuned; parity with
//! observed behaviour matters more than statistical elegance here, so keep the
//! branch structure intact.

use super::types::{MatchContext, RatingDiagnostics};
use crate::config::{CalibrationConfig, ThreeWayModelConfig};
use crate::odds::{normalize_triple, ThreeWayProbs};
use crate::ratings::{expected_score, RatingStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Favourite win probability at a 0.5 expectation (%)
const WIN_BASE_PCT: Decimal = dec!(35);
/// Favourite win probability gained per unit of expectation above 0.5 (%)
const WIN_SLOPE_PCT: Decimal = dec!(60);
/// How fast the draw share shrinks as the favourite strengthens
const DRAW_SHRINK_SLOPE: Decimal = dec!(0.5);

/// Predicts home/draw/away probabilities for draw-possible sports.
pub struct ThreeWayPredictor {
    cfg: ThreeWayModelConfig,
    shrink: Decimal,
}

impl ThreeWayPredictor {
    pub fn new(cfg: ThreeWayModelConfig, calibration: &CalibrationConfig) -> Self {
        Self {
            cfg,
            shrink: calibration.shrink,
        }
    }

    /// Predict outcome probabilities (percentages summing to 100).
    pub fn predict(
        &self,
        store: &mut RatingStore,
        ctx: &MatchContext,
        market: Option<&ThreeWayProbs>,
    ) -> ThreeWayProbs {
        self.predict_detailed(store, ctx, market).0
    }

    /// Predict with diagnostics (adjusted ratings, raw logistic expectation).
    pub fn predict_detailed(
        &self,
        store: &mut RatingStore,
        ctx: &MatchContext,
        market: Option<&ThreeWayProbs>,
    ) -> (ThreeWayProbs, RatingDiagnostics) {
        let diag = self.adjusted_ratings(store, ctx);
        let expectation = Decimal::try_from(diag.raw_home_win_prob).unwrap_or(dec!(0.5));

        let distance = (expectation - dec!(0.5)).abs();
        let draw = self.cfg.base_draw_prob * dec!(100) * (Decimal::ONE - distance * DRAW_SHRINK_SLOPE);

        let (home, away) = if expectation > dec!(0.5) {
            let home = WIN_BASE_PCT + (expectation - dec!(0.5)) * WIN_SLOPE_PCT;
            (home, dec!(100) - home - draw)
        } else {
            let away = WIN_BASE_PCT + (dec!(0.5) - expectation) * WIN_SLOPE_PCT;
            (dec!(100) - away - draw, away)
        };

        // Clamp each outcome to its band (the draw band is narrower), then
        // renormalize so the triple sums to 100 again
        let clamped = ThreeWayProbs::new(
            home.clamp(self.cfg.min_prob, self.cfg.max_prob),
            draw.clamp(self.cfg.draw_min_prob, self.cfg.draw_max_prob),
            away.clamp(self.cfg.min_prob, self.cfg.max_prob),
        );
        let mut probs = normalize_triple(clamped);

        if let Some(market) = market {
            if self.shrink > Decimal::ZERO {
                let keep = Decimal::ONE - self.shrink;
                probs = normalize_triple(ThreeWayProbs::new(
                    keep * probs.home + self.shrink * market.home,
                    keep * probs.draw + self.shrink * market.draw,
                    keep * probs.away + self.shrink * market.away,
                ));
            }
        }

        (probs, diag)
    }

    fn adjusted_ratings(&self, store: &mut RatingStore, ctx: &MatchContext) -> RatingDiagnostics {
        let home_rating = store.rating(&ctx.home_team);
        let away_rating = store.rating(&ctx.away_team);

        let goal_diff_advantage = (ctx.home_goal_diff - ctx.away_goal_diff)
            .clamp(-self.cfg.goal_diff_cap, self.cfg.goal_diff_cap);

        let adj_home = home_rating
            + self.cfg.home_advantage_elo
            + ctx.home_form * self.cfg.form_elo_scale
            + goal_diff_advantage as f64 * self.cfg.goal_diff_elo_per_goal;
        let adj_away = away_rating + ctx.away_form * self.cfg.form_elo_scale;

        RatingDiagnostics {
            home_rating,
            away_rating,
            adj_home_rating: adj_home,
            adj_away_rating: adj_away,
            elo_diff: adj_home - adj_away,
            raw_home_win_prob: expected_score(adj_home, adj_away),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> ThreeWayPredictor {
        ThreeWayPredictor::new(ThreeWayModelConfig::default(), &CalibrationConfig::default())
    }

    fn assert_sums_to_100(probs: &ThreeWayProbs) {
        assert!((probs.total() - dec!(100)).abs() < dec!(0.01), "{:?}", probs);
    }

    #[test]
    fn test_home_advantage_favours_home() {
        let mut store = RatingStore::new(1500.0);
        let probs = predictor().predict(&mut store, &MatchContext::new("Arsenal", "Chelsea"), None);
        assert!(probs.home > probs.away);
        assert_sums_to_100(&probs);
    }

    #[test]
    fn test_draw_stays_in_band() {
        let mut store = RatingStore::new(1500.0);
        store.set_rating("Arsenal", 1900.0);
        store.set_rating("Norwich", 1400.0);

        let probs = predictor().predict(&mut store, &MatchContext::new("Arsenal", "Norwich"), None);
        assert!(probs.draw >= dec!(10));
        assert!(probs.draw <= dec!(40));
        assert_sums_to_100(&probs);
    }

    #[test]
    fn test_stronger_favourite_shrinks_draw() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let even = p.predict(&mut store, &MatchContext::new("Arsenal", "Chelsea"), None);

        store.set_rating("Arsenal", 1800.0);
        let lopsided = p.predict(&mut store, &MatchContext::new("Arsenal", "Chelsea"), None);

        assert!(lopsided.draw < even.draw);
        assert!(lopsided.home > even.home);
    }

    #[test]
    fn test_away_favourite_mirrors_home_branch() {
        let mut store = RatingStore::new(1500.0);
        store.set_rating("Wolves", 1400.0);
        store.set_rating("Liverpool", 1700.0);

        let probs = predictor().predict(&mut store, &MatchContext::new("Wolves", "Liverpool"), None);
        assert!(probs.away > probs.home);
        assert_sums_to_100(&probs);
    }

    #[test]
    fn test_form_nudges_ratings() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let baseline = p.predict(&mut store, &MatchContext::new("Arsenal", "Chelsea"), None);
        let mut ctx = MatchContext::new("Arsenal", "Chelsea");
        ctx.away_form = 0.8;
        let in_form_away = p.predict(&mut store, &ctx, None);

        assert!(in_form_away.away > baseline.away);
    }

    #[test]
    fn test_goal_diff_is_capped() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let mut at_cap = MatchContext::new("Arsenal", "Chelsea");
        at_cap.home_goal_diff = 5;
        let mut beyond_cap = MatchContext::new("Arsenal", "Chelsea");
        beyond_cap.home_goal_diff = 40;

        assert_eq!(
            p.predict(&mut store, &at_cap, None),
            p.predict(&mut store, &beyond_cap, None)
        );
    }

    #[test]
    fn test_calibration_blends_all_three() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();
        let ctx = MatchContext::new("Arsenal", "Chelsea");

        let raw = p.predict(&mut store, &ctx, None);
        let market = ThreeWayProbs::new(dec!(20), dec!(30), dec!(50));
        let calibrated = p.predict(&mut store, &ctx, Some(&market));

        assert!(calibrated.home < raw.home);
        assert!(calibrated.away > raw.away);
        assert_sums_to_100(&calibrated);
    }

    #[test]
    fn test_diagnostics_expose_adjustments() {
        let mut store = RatingStore::new(1500.0);
        let mut ctx = MatchContext::new("Arsenal", "Chelsea");
        ctx.home_form = 0.5;
        ctx.home_goal_diff = 3;

        let (_, diag) = predictor().predict_detailed(&mut store, &ctx, None);
        // +60 home advantage, +50 form, +15 goal difference
        assert_eq!(diag.adj_home_rating, 1625.0);
        assert_eq!(diag.adj_away_rating, 1500.0);
    }
}
