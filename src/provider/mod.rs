//! External data providers
//!
//! Results fetching and tabular ratings import. Everything here is thin I/O:
//! parsed records flow into the bot, which owns the rating updates.

mod import;
mod results;

pub use import::parse_ratings_table;
pub use results::{is_final_status, GameRecord, ResultsClient};
