//! Team Elo ratings
//!
//! Canonical team naming, the in-memory rating store, and the Elo
//! expected-score / update formulas.

mod elo;
mod names;
mod store;

pub use elo::{expected_score, update, MatchOutcome};
pub use names::canonical_team_name;
pub use store::RatingStore;
