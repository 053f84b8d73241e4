//! 2-way outcome predictor
//!
//! Home advantage, rest differential, back-to-backs and star-out flags all
//! shift ratings in Elo-point space before the logistic transform; the output
//! probabilities are never adjusted directly.

use super::types::{GameContext, RatingDiagnostics};
use crate::config::{CalibrationConfig, TwoWayModelConfig};
use crate::odds::{normalize_pair, TwoWayProbs};
use crate::ratings::{expected_score, RatingStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Predicts home/away win probabilities for no-draw sports.
pub struct TwoWayPredictor {
    cfg: TwoWayModelConfig,
    shrink: Decimal,
}

impl TwoWayPredictor {
    pub fn new(cfg: TwoWayModelConfig, calibration: &CalibrationConfig) -> Self {
        Self {
            cfg,
            shrink: calibration.shrink,
        }
    }

    /// Predict win probabilities (percentages summing to 100).
    ///
    /// When `market` is given and the shrink factor is positive, the model
    /// probabilities are blended toward the market and renormalized.
    pub fn predict(
        &self,
        store: &mut RatingStore,
        ctx: &GameContext,
        market: Option<&TwoWayProbs>,
    ) -> TwoWayProbs {
        self.predict_detailed(store, ctx, market).0
    }

    /// Predict with diagnostics (adjusted ratings, raw logistic expectation).
    pub fn predict_detailed(
        &self,
        store: &mut RatingStore,
        ctx: &GameContext,
        market: Option<&TwoWayProbs>,
    ) -> (TwoWayProbs, RatingDiagnostics) {
        let diag = self.adjusted_ratings(store, ctx);

        let home_pct = Decimal::try_from(diag.raw_home_win_prob * 100.0).unwrap_or(dec!(50));
        let away_pct =
            Decimal::try_from((1.0 - diag.raw_home_win_prob) * 100.0).unwrap_or(dec!(50));

        // Clamp to the configured band, then renormalize: clamping alone
        // breaks the sum-to-100 invariant
        let clamped = TwoWayProbs::new(
            home_pct.clamp(self.cfg.min_prob, self.cfg.max_prob),
            away_pct.clamp(self.cfg.min_prob, self.cfg.max_prob),
        );
        let mut probs = normalize_pair(clamped);

        if let Some(market) = market {
            if self.shrink > Decimal::ZERO {
                let keep = Decimal::ONE - self.shrink;
                probs = normalize_pair(TwoWayProbs::new(
                    keep * probs.home + self.shrink * market.home,
                    keep * probs.away + self.shrink * market.away,
                ));
            }
        }

        (probs, diag)
    }

    fn adjusted_ratings(&self, store: &mut RatingStore, ctx: &GameContext) -> RatingDiagnostics {
        let home_rating = store.rating(&ctx.home_team);
        let away_rating = store.rating(&ctx.away_team);

        let mut adj_home = home_rating
            + self.cfg.home_advantage_elo
            + ctx.rest_diff as f64 * self.cfg.rest_elo_per_day;
        let mut adj_away = away_rating;

        if ctx.home_b2b {
            adj_home -= self.cfg.b2b_penalty_elo;
        }
        if ctx.away_b2b {
            adj_away -= self.cfg.b2b_penalty_elo;
        }
        if ctx.home_star_out {
            adj_home -= self.cfg.star_out_penalty_elo;
        }
        if ctx.away_star_out {
            adj_away -= self.cfg.star_out_penalty_elo;
        }

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

    fn predictor() -> TwoWayPredictor {
        TwoWayPredictor::new(TwoWayModelConfig::default(), &CalibrationConfig::default())
    }

    fn assert_sums_to_100(probs: &TwoWayProbs) {
        assert!((probs.total() - dec!(100)).abs() < dec!(0.01), "{:?}", probs);
    }

    #[test]
    fn test_home_advantage_favours_home() {
        let mut store = RatingStore::new(1500.0);
        let probs = predictor().predict(&mut store, &GameContext::new("BOS", "LAL"), None);
        // Equal ratings + home court: home is the favourite
        assert!(probs.home > dec!(50));
        assert_sums_to_100(&probs);
    }

    #[test]
    fn test_back_to_back_lowers_home_prob() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let baseline = p.predict(&mut store, &GameContext::new("BOS", "LAL"), None);
        let mut ctx = GameContext::new("BOS", "LAL");
        ctx.home_b2b = true;
        let tired = p.predict(&mut store, &ctx, None);

        assert!(tired.home < baseline.home);
        assert_sums_to_100(&tired);
    }

    #[test]
    fn test_rest_advantage_raises_home_prob() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let baseline = p.predict(&mut store, &GameContext::new("BOS", "LAL"), None);
        let mut ctx = GameContext::new("BOS", "LAL");
        ctx.rest_diff = 2;
        let rested = p.predict(&mut store, &ctx, None);

        assert!(rested.home > baseline.home);
    }

    #[test]
    fn test_star_out_penalises_flagged_side() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();

        let mut ctx = GameContext::new("BOS", "LAL");
        ctx.away_star_out = true;
        let probs = p.predict(&mut store, &ctx, None);
        let baseline = p.predict(&mut store, &GameContext::new("BOS", "LAL"), None);

        assert!(probs.home > baseline.home);
    }

    #[test]
    fn test_huge_gap_clamps_to_band() {
        let mut store = RatingStore::new(1500.0);
        store.set_rating("BOS", 2400.0);
        store.set_rating("LAL", 1200.0);

        let probs = predictor().predict(&mut store, &GameContext::new("BOS", "LAL"), None);
        assert!(probs.home <= dec!(95));
        assert!(probs.away >= dec!(5));
        assert_sums_to_100(&probs);
    }

    #[test]
    fn test_calibration_pulls_toward_market() {
        let mut store = RatingStore::new(1500.0);
        let p = predictor();
        let ctx = GameContext::new("BOS", "LAL");

        let raw = p.predict(&mut store, &ctx, None);
        let market = TwoWayProbs::new(dec!(40), dec!(60));
        let calibrated = p.predict(&mut store, &ctx, Some(&market));

        assert!(calibrated.home < raw.home);
        assert!(calibrated.home > market.home);
        assert_sums_to_100(&calibrated);
    }

    #[test]
    fn test_zero_shrink_skips_calibration() {
        let mut store = RatingStore::new(1500.0);
        let p = TwoWayPredictor::new(
            TwoWayModelConfig::default(),
            &CalibrationConfig {
                shrink: Decimal::ZERO,
            },
        );
        let ctx = GameContext::new("BOS", "LAL");

        let raw = p.predict(&mut store, &ctx, None);
        let market = TwoWayProbs::new(dec!(40), dec!(60));
        assert_eq!(p.predict(&mut store, &ctx, Some(&market)), raw);
    }

    #[test]
    fn test_diagnostics_expose_adjustments() {
        let mut store = RatingStore::new(1500.0);
        let mut ctx = GameContext::new("BOS", "LAL");
        ctx.home_b2b = true;

        let (_, diag) = predictor().predict_detailed(&mut store, &ctx, None);
        assert_eq!(diag.home_rating, 1500.0);
        // +50 home court, -30 back-to-back
        assert_eq!(diag.adj_home_rating, 1520.0);
        assert_eq!(diag.adj_away_rating, 1500.0);
        assert!(diag.raw_home_win_prob > 0.5);
    }
}
