//! Rating management commands

use super::build_bot;
use crate::config::Config;
use crate::predict::Sport;
use crate::provider::ResultsClient;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RecordResultArgs {
    pub home_team: String,
    pub away_team: String,
    pub home_score: i64,
    pub away_score: i64,

    #[arg(long, default_value = "basketball")]
    pub sport: Sport,
    /// Game date (YYYY-MM-DD), recorded alongside the score when given
    #[arg(long)]
    pub date: Option<String>,
}

impl RecordResultArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut bot = build_bot(config)?;
        bot.record_result(
            self.sport,
            &self.home_team,
            &self.away_team,
            self.home_score,
            self.away_score,
            self.date.as_deref(),
        )?;

        println!("Ratings updated for {} vs {}", self.home_team, self.away_team);
        println!("  {}: {:.0}", self.home_team, bot.rating(&self.home_team));
        println!("  {}: {:.0}", self.away_team, bot.rating(&self.away_team));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SyncResultsArgs {
    /// Date to fetch results for (YYYY-MM-DD)
    pub date: String,

    #[arg(long, default_value = "basketball")]
    pub sport: Sport,
}

impl SyncResultsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = ResultsClient::new(&config.provider)?;
        let games = client.games_on(&self.date)?;
        tracing::debug!(fetched = games.len(), date = %self.date, "fetched games");

        let mut bot = build_bot(config)?;
        let applied = bot.apply_final_results(self.sport, &games)?;

        println!(
            "Applied {applied} final result(s) out of {} game(s) on {}",
            games.len(),
            self.date
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ImportRatingsArgs {
    /// CSV file with team_name/team and elo/rating columns
    pub csv_path: PathBuf,
}

impl ImportRatingsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let table = std::fs::read_to_string(&self.csv_path)
            .with_context(|| format!("reading {}", self.csv_path.display()))?;

        let mut bot = build_bot(config)?;
        let count = bot.import_ratings(&table)?;

        println!("Imported {count} ratings from {}", self.csv_path.display());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetRatingArgs {
    pub team: String,
    pub rating: f64,
}

impl SetRatingArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut bot = build_bot(config)?;
        bot.set_rating(&self.team, self.rating)?;

        println!("Rating set: {} -> {:.0}", self.team, self.rating);
        Ok(())
    }
}
