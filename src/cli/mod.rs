//! CLI interface for elo-edge
//!
//! Provides subcommands for:
//! - `analyze`: 2-way game analysis against moneyline or decimal odds
//! - `analyze-match`: 3-way match analysis against decimal odds
//! - `bet` / `settle` / `list-bets` / `stats`: bet tracking
//! - `record-result` / `sync-results`: Elo updates from final scores
//! - `import-ratings` / `set-rating`: rating management

mod analyze;
mod bets;
mod ratings;

pub use analyze::{AnalyzeArgs, AnalyzeMatchArgs};
pub use bets::{BetArgs, ListBetsArgs, SettleArgs, StatsArgs};
pub use ratings::{ImportRatingsArgs, RecordResultArgs, SetRatingArgs, SyncResultsArgs};

use crate::bot::BettingBot;
use crate::config::Config;
use crate::db::Database;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "elo-edge")]
#[command(about = "Elo-driven betting analysis for 2-way and 3-way sports markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a 2-way game and get a betting recommendation
    Analyze(AnalyzeArgs),
    /// Analyse a 3-way match and get a betting recommendation
    AnalyzeMatch(AnalyzeMatchArgs),
    /// Record a bet
    Bet(BetArgs),
    /// Settle a recorded bet
    Settle(SettleArgs),
    /// Update Elo ratings from a final score
    RecordResult(RecordResultArgs),
    /// Fetch a day's results and apply every final game
    SyncResults(SyncResultsArgs),
    /// Import Elo ratings from a CSV file
    ImportRatings(ImportRatingsArgs),
    /// Manually override a team's rating
    SetRating(SetRatingArgs),
    /// Show betting statistics
    Stats(StatsArgs),
    /// List recorded bets
    ListBets(ListBetsArgs),
}

pub(crate) fn build_bot(config: &Config) -> anyhow::Result<BettingBot> {
    let db = Database::open(&config.storage.db_path)?;
    BettingBot::new(config, db)
}
