//! elo-edge: Elo-driven betting analysis for 2-way and 3-way sports markets
//!
//! This library provides the core components for:
//! - Odds conversion (decimal, moneyline, implied probability)
//! - Bookmaker margin removal
//! - Team Elo ratings with canonical naming
//! - Outcome prediction with contextual adjustments and market calibration
//! - Elo updates from final results
//! - Kelly / flat bet sizing with recommendation gating
//! - SQLite bet and rating persistence
//! - Results fetching and ratings import

pub mod bot;
pub mod cli;
pub mod config;
pub mod db;
pub mod odds;
pub mod predict;
pub mod provider;
pub mod ratings;
pub mod staking;
pub mod telemetry;
