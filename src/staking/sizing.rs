//! Stake sizing

use super::kelly_fraction;
use crate::config::{StakeMode, StakingConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sizes bets from the configured staking mode.
///
/// Flat staking bets a fixed percentage of bankroll regardless of edge; Kelly
/// sizing scales with edge but is capped at the maximum stake fraction.
#[derive(Debug, Clone)]
pub struct StakeSizer {
    pub mode: StakeMode,
    pub kelly_multiplier: Decimal,
    pub max_stake_pct: Decimal,
    pub flat_stake_pct: Decimal,
}

impl StakeSizer {
    pub fn from_config(config: &StakingConfig) -> Self {
        Self {
            mode: config.mode,
            kelly_multiplier: config.kelly_multiplier,
            max_stake_pct: config.max_stake_pct,
            flat_stake_pct: config.flat_stake_pct,
        }
    }

    /// Stake amount for a bet with the given win probability (0-1 fraction)
    /// and decimal odds.
    pub fn bet_size(&self, bankroll: Decimal, probability: Decimal, odds: Decimal) -> Decimal {
        bankroll * self.stake_fraction(probability, odds)
    }

    /// Fraction of bankroll the configured mode would stake.
    pub fn stake_fraction(&self, probability: Decimal, odds: Decimal) -> Decimal {
        match self.mode {
            StakeMode::Flat => self.flat_stake_pct / dec!(100),
            StakeMode::Kelly => kelly_fraction(
                probability,
                odds,
                self.kelly_multiplier,
                self.max_stake_pct / dec!(100),
            ),
        }
    }
}

impl Default for StakeSizer {
    fn default() -> Self {
        Self::from_config(&StakingConfig::default())
    }
}
