//! Analysis commands

use super::build_bot;
use crate::bot::{BetRecommendation, TwoWayOdds};
use crate::config::Config;
use crate::predict::{GameContext, MatchContext, RatingDiagnostics};
use clap::Args;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    pub home_team: String,
    pub away_team: String,

    /// American moneyline for the home side (e.g. -150)
    #[arg(long, allow_hyphen_values = true)]
    pub home_ml: Option<Decimal>,
    /// American moneyline for the away side (e.g. +130)
    #[arg(long, allow_hyphen_values = true)]
    pub away_ml: Option<Decimal>,
    /// Decimal odds for the home side (alternative to moneylines)
    #[arg(long)]
    pub home_odds: Option<Decimal>,
    /// Decimal odds for the away side
    #[arg(long)]
    pub away_odds: Option<Decimal>,

    /// Extra rest days the home team has over the away team
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub rest_diff: i32,
    /// Home team is on a back-to-back
    #[arg(long)]
    pub home_b2b: bool,
    /// Away team is on a back-to-back
    #[arg(long)]
    pub away_b2b: bool,
    /// Home team has a star player out
    #[arg(long)]
    pub home_star_out: bool,
    /// Away team has a star player out
    #[arg(long)]
    pub away_star_out: bool,

    /// Skip shrinking model probabilities toward the market
    #[arg(long)]
    pub no_calibration: bool,
    /// Show adjusted-rating diagnostics
    #[arg(long)]
    pub debug: bool,
}

impl AnalyzeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let odds =
            TwoWayOdds::from_parts(self.home_ml, self.away_ml, self.home_odds, self.away_odds)?;

        let mut ctx = GameContext::new(&self.home_team, &self.away_team);
        ctx.rest_diff = self.rest_diff;
        ctx.home_b2b = self.home_b2b;
        ctx.away_b2b = self.away_b2b;
        ctx.home_star_out = self.home_star_out;
        ctx.away_star_out = self.away_star_out;

        let mut bot = build_bot(config)?;
        let analysis = bot.analyze_game(&ctx, &odds, !self.no_calibration, self.debug);

        print_header(&analysis.home_team, &analysis.away_team);
        println!("\nTeam Elo Ratings:");
        println!("  {}: {:.0}", analysis.home_team, analysis.home_rating);
        println!("  {}: {:.0}", analysis.away_team, analysis.away_rating);

        if let Some(diag) = &analysis.diagnostics {
            print_diagnostics(diag);
        }

        println!("\nMarket Probabilities (vig removed):");
        println!("  Home: {:.2}%", analysis.market_probabilities.home);
        println!("  Away: {:.2}%", analysis.market_probabilities.away);

        println!("\nModel (True) Probabilities:");
        println!("  Home: {:.2}%", analysis.true_probabilities.home);
        println!("  Away: {:.2}%", analysis.true_probabilities.away);

        println!("\nEdges (True - Market):");
        println!("  Home: {}%", fmt_signed(analysis.edges.home));
        println!("  Away: {}%", fmt_signed(analysis.edges.away));

        print_recommendation(analysis.recommendation.as_ref(), config);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeMatchArgs {
    pub home_team: String,
    pub away_team: String,
    /// Decimal odds for a home win
    pub home_odds: Decimal,
    /// Decimal odds for a draw
    pub draw_odds: Decimal,
    /// Decimal odds for an away win
    pub away_odds: Decimal,

    /// Recent form for the home team (-1 to 1)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub home_form: f64,
    /// Recent form for the away team (-1 to 1)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub away_form: f64,
    /// Season goal difference for the home team
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub home_goal_diff: i64,
    /// Season goal difference for the away team
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub away_goal_diff: i64,

    /// Skip shrinking model probabilities toward the market
    #[arg(long)]
    pub no_calibration: bool,
    /// Show adjusted-rating diagnostics
    #[arg(long)]
    pub debug: bool,
}

impl AnalyzeMatchArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut ctx = MatchContext::new(&self.home_team, &self.away_team);
        ctx.home_form = self.home_form;
        ctx.away_form = self.away_form;
        ctx.home_goal_diff = self.home_goal_diff;
        ctx.away_goal_diff = self.away_goal_diff;

        let mut bot = build_bot(config)?;
        let analysis = bot.analyze_match(
            &ctx,
            self.home_odds,
            self.draw_odds,
            self.away_odds,
            !self.no_calibration,
            self.debug,
        );

        print_header(&analysis.home_team, &analysis.away_team);
        println!("\nTeam Elo Ratings:");
        println!("  {}: {:.0}", analysis.home_team, analysis.home_rating);
        println!("  {}: {:.0}", analysis.away_team, analysis.away_rating);

        if let Some(diag) = &analysis.diagnostics {
            print_diagnostics(diag);
        }

        println!("\nMarket Probabilities (margin removed):");
        println!("  Home: {:.2}%", analysis.market_probabilities.home);
        println!("  Draw: {:.2}%", analysis.market_probabilities.draw);
        println!("  Away: {:.2}%", analysis.market_probabilities.away);

        println!("\nModel (True) Probabilities:");
        println!("  Home: {:.2}%", analysis.true_probabilities.home);
        println!("  Draw: {:.2}%", analysis.true_probabilities.draw);
        println!("  Away: {:.2}%", analysis.true_probabilities.away);

        println!("\nEdges (True - Market):");
        println!("  Home: {}%", fmt_signed(analysis.edges.home));
        println!("  Draw: {}%", fmt_signed(analysis.edges.draw));
        println!("  Away: {}%", fmt_signed(analysis.edges.away));

        print_recommendation(analysis.recommendation.as_ref(), config);
        Ok(())
    }
}

/// Render a decimal with an explicit sign, two places.
pub(crate) fn fmt_signed(value: Decimal) -> String {
    format!("{:+.2}", value.to_f64().unwrap_or(0.0))
}

fn print_header(home_team: &str, away_team: &str) {
    println!("\n{}", "=".repeat(70));
    println!("ANALYSIS: {} vs {}", home_team, away_team);
    println!("{}", "=".repeat(70));
}

fn print_diagnostics(diag: &RatingDiagnostics) {
    println!("\nDiagnostics:");
    println!("  home_elo_raw: {:.2}", diag.home_rating);
    println!("  away_elo_raw: {:.2}", diag.away_rating);
    println!("  adj_home_elo: {:.2}", diag.adj_home_rating);
    println!("  adj_away_elo: {:.2}", diag.adj_away_rating);
    println!("  elo_diff (home-away, adjusted): {:.2}", diag.elo_diff);
    println!(
        "  p_home_raw (pre-calibration): {:.2}%",
        diag.raw_home_win_prob * 100.0
    );
}

fn print_recommendation(recommendation: Option<&BetRecommendation>, config: &Config) {
    match recommendation {
        Some(rec) => {
            println!("\n{}", "*".repeat(70));
            println!("BETTING RECOMMENDATION:");
            println!("{}", "*".repeat(70));
            println!("  Bet Type: {}", rec.outcome.as_str().to_uppercase());
            println!("  Odds: {}", rec.odds);
            println!("  Recommended Stake: ${:.2}", rec.stake);
            println!("  Edge: {}%", fmt_signed(rec.edge));
            println!("  True Probability: {:.2}%", rec.true_probability);
            println!("  Market Probability: {:.2}%", rec.market_probability);
            println!("  Potential Return: ${:.2}", rec.potential_return);
            println!("  Potential Profit: ${:.2}", rec.potential_profit);
            println!("{}", "*".repeat(70));
        }
        None => {
            println!(
                "\nNo bet recommended (does not meet filters: model_prob >= {}%, edge >= {}%)",
                config.gating.min_favorite_prob, config.gating.min_edge
            );
        }
    }
    println!();
}
