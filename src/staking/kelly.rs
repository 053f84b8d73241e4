//! Kelly criterion stake fraction
//!
//! f* = (b*p - q) / b, with b = odds - 1 and q = 1 - p. Fractional Kelly
//! scales the raw fraction down; a hard cap bounds the worst case.

use rust_decimal::Decimal;

/// Fraction of bankroll to stake.
///
/// Returns 0 for degenerate inputs (probability outside (0,1), odds at or
/// below 1) and whenever the raw Kelly fraction is non-positive; otherwise the
/// multiplied fraction, capped at `max_fraction`.
pub fn kelly_fraction(
    probability: Decimal,
    odds: Decimal,
    multiplier: Decimal,
    max_fraction: Decimal,
) -> Decimal {
    if probability <= Decimal::ZERO || probability >= Decimal::ONE || odds <= Decimal::ONE {
        return Decimal::ZERO;
    }

    let b = odds - Decimal::ONE;
    let q = Decimal::ONE - probability;
    let raw = (b * probability - q) / b;

    let scaled = raw * multiplier;
    if scaled <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    scaled.min(max_fraction)
}
