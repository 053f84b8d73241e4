//! Outcome prediction from adjusted Elo ratings
//!
//! Two predictors share the same shape: 2-way (no draw) and 3-way (draw
//! possible). All contextual adjustments are additive in Elo-point space and
//! applied before the logistic transform; probabilities are clamped and
//! renormalized afterwards, and optionally calibrated toward the market.

mod binary;
mod three_way;
mod types;

pub use binary::TwoWayPredictor;
pub use three_way::ThreeWayPredictor;
pub use types::{GameContext, MatchContext, Outcome, RatingDiagnostics, Sport};
