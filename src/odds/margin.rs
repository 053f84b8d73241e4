//! Bookmaker margin (vig / overround) removal
//!
//! Implied probabilities off a book sum to more than 100%; the excess is the
//! bookmaker's margin. De-vigging rescales proportionally so the outcome set
//! sums to 100. The 3-way path deliberately passes totals at or below 100
//! through unchanged instead of scaling them up.

use super::{ThreeWayProbs, TwoWayProbs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Remove the vig from a 2-way market (percentages in, percentages out).
///
/// Any positive total is rescaled to 100; an all-zero input yields 50/50.
pub fn remove_vig_two_way(home_prob: Decimal, away_prob: Decimal) -> TwoWayProbs {
    let total = home_prob + away_prob;
    if total <= Decimal::ZERO {
        return TwoWayProbs::new(dec!(50), dec!(50));
    }
    TwoWayProbs::new(
        (home_prob / total) * dec!(100),
        (away_prob / total) * dec!(100),
    )
}

/// Remove the bookmaker margin from a 3-way market.
///
/// Totals at or below 100 carry no margin and are returned as-is; an all-zero
/// input yields a uniform split.
pub fn remove_vig_three_way(
    home_prob: Decimal,
    draw_prob: Decimal,
    away_prob: Decimal,
) -> ThreeWayProbs {
    let total = home_prob + draw_prob + away_prob;
    if total == Decimal::ZERO {
        return ThreeWayProbs::new(dec!(33.33), dec!(33.33), dec!(33.33));
    }
    if total <= dec!(100) {
        return ThreeWayProbs::new(home_prob, draw_prob, away_prob);
    }
    ThreeWayProbs::new(
        (home_prob / total) * dec!(100),
        (draw_prob / total) * dec!(100),
        (away_prob / total) * dec!(100),
    )
}

/// Rescale a pair to sum to exactly 100 (uniform split on zero input).
///
/// Used by the predictor after every clamping and calibration step.
pub fn normalize_pair(probs: TwoWayProbs) -> TwoWayProbs {
    let total = probs.total();
    if total <= Decimal::ZERO {
        return TwoWayProbs::new(dec!(50), dec!(50));
    }
    TwoWayProbs::new(
        (probs.home / total) * dec!(100),
        (probs.away / total) * dec!(100),
    )
}

/// Rescale a triple to sum to exactly 100 (uniform split on zero input).
pub fn normalize_triple(probs: ThreeWayProbs) -> ThreeWayProbs {
    let total = probs.total();
    if total <= Decimal::ZERO {
        return ThreeWayProbs::new(dec!(33.33), dec!(33.33), dec!(33.33));
    }
    ThreeWayProbs::new(
        (probs.home / total) * dec!(100),
        (probs.draw / total) * dec!(100),
        (probs.away / total) * dec!(100),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Decimal, b: Decimal) {
        assert!((a - b).abs() < dec!(0.01), "{} != {}", a, b);
    }

    #[test]
    fn test_two_way_overround_removed() {
        // -150 / +130 book: 60% + 43.48% = 103.48% implied
        let fair = remove_vig_two_way(dec!(60), dec!(43.478261));
        assert_close(fair.total(), dec!(100));
        assert!(fair.home > fair.away);
        assert_close(fair.home, dec!(57.98));
    }

    #[test]
    fn test_two_way_rescales_below_100() {
        // The 2-way path always renormalises positive totals
        let fair = remove_vig_two_way(dec!(40), dec!(40));
        assert_eq!(fair.home, dec!(50));
        assert_eq!(fair.away, dec!(50));
    }

    #[test]
    fn test_two_way_zero_input() {
        let fair = remove_vig_two_way(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(fair.home, dec!(50));
        assert_eq!(fair.away, dec!(50));
    }

    #[test]
    fn test_three_way_overround_removed() {
        let fair = remove_vig_three_way(dec!(50), dec!(30), dec!(28));
        assert_close(fair.total(), dec!(100));
        assert!(fair.home > fair.away);
    }

    #[test]
    fn test_three_way_passthrough_below_100() {
        let fair = remove_vig_three_way(dec!(45), dec!(25), dec!(28));
        assert_eq!(fair.home, dec!(45));
        assert_eq!(fair.draw, dec!(25));
        assert_eq!(fair.away, dec!(28));
    }

    #[test]
    fn test_three_way_zero_input() {
        let fair = remove_vig_three_way(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(fair.home, dec!(33.33));
        assert_eq!(fair.draw, dec!(33.33));
        assert_eq!(fair.away, dec!(33.33));
    }

    #[test]
    fn test_normalize_pair() {
        let n = normalize_pair(TwoWayProbs::new(dec!(95), dec!(10)));
        assert_close(n.total(), dec!(100));
        assert_close(n.home, dec!(90.48));
    }

    #[test]
    fn test_normalize_triple() {
        let n = normalize_triple(ThreeWayProbs::new(dec!(85), dec!(40), dec!(20)));
        assert_close(n.total(), dec!(100));
    }
}
