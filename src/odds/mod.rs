//! Odds conversion and bookmaker-margin removal
//!
//! All probabilities in this module are percentages (0-100) unless a function
//! says otherwise. Conversions are total: degenerate inputs map to zero rather
//! than erroring.

mod convert;
mod margin;

pub use convert::{
    cents_to_prob, decimal_to_implied_prob, implied_prob_to_decimal, implied_prob_to_moneyline,
    moneyline_to_decimal, moneyline_to_implied_prob,
};
pub use margin::{normalize_pair, normalize_triple, remove_vig_three_way, remove_vig_two_way};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Home/away probability pair (percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoWayProbs {
    pub home: Decimal,
    pub away: Decimal,
}

/// Home/draw/away probability triple (percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreeWayProbs {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
}

impl TwoWayProbs {
    pub fn new(home: Decimal, away: Decimal) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> Decimal {
        self.home + self.away
    }
}

impl ThreeWayProbs {
    pub fn new(home: Decimal, draw: Decimal, away: Decimal) -> Self {
        Self { home, draw, away }
    }

    pub fn total(&self) -> Decimal {
        self.home + self.draw + self.away
    }
}
