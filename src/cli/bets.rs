//! Bet tracking commands

use super::analyze::fmt_signed;
use super::build_bot;
use crate::config::Config;
use crate::db::{BetResult, NewBet};
use crate::predict::{Outcome, Sport};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct BetArgs {
    pub home_team: String,
    pub away_team: String,
    /// Outcome backed: home, draw or away
    pub bet_type: Outcome,
    /// Decimal odds taken
    pub odds: Decimal,
    /// Stake amount
    pub stake: Decimal,

    /// Model probability (%) at placement
    #[arg(long, default_value = "0")]
    pub true_prob: Decimal,
    /// Market probability (%) at placement
    #[arg(long, default_value = "0")]
    pub market_prob: Decimal,
    /// Match date (YYYY-MM-DD)
    #[arg(long)]
    pub match_date: Option<String>,
    #[arg(long, default_value = "basketball")]
    pub sport: Sport,
}

impl BetArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut bot = build_bot(config)?;
        let bet_id = bot.place_bet(NewBet {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            bet_type: self.bet_type,
            odds: self.odds,
            stake: self.stake,
            true_probability: self.true_prob,
            market_probability: self.market_prob,
            edge: self.true_prob - self.market_prob,
            match_date: self.match_date.clone(),
            sport: self.sport,
        })?;

        println!("Bet placed! Bet ID: {bet_id}");
        println!("  New bankroll: ${:.2}", bot.bankroll());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SettleArgs {
    pub bet_id: i64,
    /// win, loss or push
    pub result: BetResult,
}

impl SettleArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut bot = build_bot(config)?;
        let profit_loss = bot.settle_bet(self.bet_id, self.result)?;

        println!("Bet {} settled as {}", self.bet_id, self.result.as_str());
        println!("  P/L: ${}", fmt_signed(profit_loss));
        println!("  Current bankroll: ${:.2}", bot.bankroll());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {}

impl StatsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bot = build_bot(config)?;
        let stats = bot.statistics()?;

        println!("\n{}", "=".repeat(70));
        println!("BETTING STATISTICS");
        println!("{}", "=".repeat(70));
        println!("Current Bankroll: ${:.2}", stats.bankroll);
        println!("\nTotal Bets: {}", stats.bets.total_bets);
        println!("  Settled: {}", stats.bets.settled_bets);
        println!("  Pending: {}", stats.bets.pending_bets);
        println!("\nResults:");
        println!("  Wins: {}", stats.bets.wins);
        println!("  Losses: {}", stats.bets.losses);
        println!("  Win Rate: {:.1}%", stats.bets.win_rate);
        println!("\nFinancials:");
        println!("  Total Staked: ${:.2}", stats.bets.total_staked);
        println!("  Total P/L: ${}", fmt_signed(stats.bets.total_profit_loss));
        println!("  ROI: {:.2}%", stats.bets.roi);
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListBetsArgs {
    /// Only show unsettled bets
    #[arg(long)]
    pub pending: bool,
}

impl ListBetsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bot = build_bot(config)?;
        let (bets, header) = if self.pending {
            let bets = bot.pending_bets()?;
            let header = format!("PENDING BETS ({})", bets.len());
            (bets, header)
        } else {
            let bets = bot.all_bets()?;
            let header = format!("ALL BETS ({})", bets.len());
            (bets, header)
        };

        println!("\n{}", "=".repeat(70));
        println!("{header}");
        println!("{}", "=".repeat(70));

        if bets.is_empty() {
            println!("No bets found.");
            return Ok(());
        }

        for bet in bets {
            println!("\nBet ID: {}", bet.id);
            println!("  Game:  {} vs {}", bet.home_team, bet.away_team);
            println!("  Type:  {}", bet.bet_type.as_str());
            println!("  Odds:  {}", bet.odds);
            println!("  Stake: ${:.2}", bet.stake);
            println!("  Edge:  {}%", fmt_signed(bet.edge));
            if let Some(result) = bet.result {
                println!("  Result: {}", result.as_str());
                if let Some(profit_loss) = bet.profit_loss {
                    println!("  P/L:    ${}", fmt_signed(profit_loss));
                }
            }
        }
        println!();
        Ok(())
    }
}
