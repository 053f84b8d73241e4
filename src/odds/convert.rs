//! Pure conversions between decimal odds, American moneylines and implied
//! probability percentages.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Convert decimal odds to implied probability (%).
///
/// Returns 0 for odds at or below 1.0 (no payout, no probability).
pub fn decimal_to_implied_prob(odds: Decimal) -> Decimal {
    if odds <= Decimal::ONE {
        return Decimal::ZERO;
    }
    dec!(100) / odds
}

/// Convert an American moneyline (e.g. -150, +130) to implied probability (%).
pub fn moneyline_to_implied_prob(ml: Decimal) -> Decimal {
    if ml == Decimal::ZERO {
        return Decimal::ZERO;
    }
    if ml > Decimal::ZERO {
        (dec!(100) / (ml + dec!(100))) * dec!(100)
    } else {
        let abs_ml = ml.abs();
        (abs_ml / (abs_ml + dec!(100))) * dec!(100)
    }
}

/// Convert implied probability (%) back to decimal odds.
///
/// Probabilities outside the open interval (0, 100) are degenerate and map
/// to 0.
pub fn implied_prob_to_decimal(probability: Decimal) -> Decimal {
    if probability <= Decimal::ZERO || probability >= dec!(100) {
        return Decimal::ZERO;
    }
    dec!(100) / probability
}

/// Convert implied probability (%) to an American moneyline.
///
/// Favourites (p >= 50%) get a negative line, underdogs a positive one.
pub fn implied_prob_to_moneyline(probability: Decimal) -> Decimal {
    if probability <= Decimal::ZERO || probability >= dec!(100) {
        return Decimal::ZERO;
    }
    let p = probability / dec!(100);
    if p >= dec!(0.5) {
        -(p / (Decimal::ONE - p)) * dec!(100)
    } else {
        ((Decimal::ONE - p) / p) * dec!(100)
    }
}

/// Convert an American moneyline to decimal odds.
pub fn moneyline_to_decimal(ml: Decimal) -> Decimal {
    if ml == Decimal::ZERO {
        return Decimal::ZERO;
    }
    if ml > Decimal::ZERO {
        Decimal::ONE + ml / dec!(100)
    } else {
        Decimal::ONE + dec!(100) / ml.abs()
    }
}

/// Convert a "cents" market split value to a probability fraction (0-1).
///
/// Splits are quoted in cents (home=41, away=60); the vig is removed later.
pub fn cents_to_prob(cents: Decimal) -> Decimal {
    (cents / dec!(100)).max(Decimal::ZERO)
}
