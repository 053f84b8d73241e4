//! Bot errors

use thiserror::Error;

/// Contract violations at the orchestration boundary.
///
/// Pure numeric conversions degrade to zero values instead; these errors mark
/// integration mistakes that must not be swallowed.
#[derive(Debug, Error)]
pub enum BotError {
    /// Neither (or both) of the moneyline / decimal odds pairs was supplied
    #[error("provide either a moneyline pair or a decimal odds pair, not both")]
    MissingOdds,
    /// Settlement referenced a bet that does not exist
    #[error("bet {0} not found")]
    UnknownBet(i64),
    /// Storage failure
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
