//! Configuration types for elo-edge

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub elo: EloConfig,
    #[serde(default)]
    pub two_way: TwoWayModelConfig,
    #[serde(default)]
    pub three_way: ThreeWayModelConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub gating: GatingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Rating system configuration shared by both sport shapes
#[derive(Debug, Clone, Deserialize)]
pub struct EloConfig {
    /// Rating assigned to teams on first sight
    #[serde(default = "default_initial_rating")]
    pub initial_rating: f64,
}

fn default_initial_rating() -> f64 {
    1500.0
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
        }
    }
}

/// Model configuration for 2-way (no-draw) sports
#[derive(Debug, Clone, Deserialize)]
pub struct TwoWayModelConfig {
    /// K-factor for rating updates
    #[serde(default = "default_two_way_k")]
    pub k_factor: f64,

    /// Home advantage baked into rating updates (Elo points)
    #[serde(default)]
    pub update_home_advantage: f64,

    /// Home advantage applied before prediction (Elo points)
    #[serde(default = "default_home_advantage_two_way")]
    pub home_advantage_elo: f64,

    /// Extra Elo per additional rest day over the opponent
    #[serde(default = "default_rest_elo")]
    pub rest_elo_per_day: f64,

    /// Penalty for playing the second night of a back-to-back
    #[serde(default = "default_b2b_penalty")]
    pub b2b_penalty_elo: f64,

    /// Penalty when a star player is flagged out
    #[serde(default = "default_star_out_penalty")]
    pub star_out_penalty_elo: f64,

    /// Probability clamp band (%)
    #[serde(default = "default_min_prob_two_way")]
    pub min_prob: Decimal,
    #[serde(default = "default_max_prob_two_way")]
    pub max_prob: Decimal,
}

fn default_two_way_k() -> f64 {
    20.0
}
fn default_home_advantage_two_way() -> f64 {
    50.0
}
fn default_rest_elo() -> f64 {
    15.0
}
fn default_b2b_penalty() -> f64 {
    30.0
}
fn default_star_out_penalty() -> f64 {
    50.0
}
fn default_min_prob_two_way() -> Decimal {
    Decimal::new(5, 0)
}
fn default_max_prob_two_way() -> Decimal {
    Decimal::new(95, 0)
}

impl Default for TwoWayModelConfig {
    fn default() -> Self {
        Self {
            k_factor: 20.0,
            update_home_advantage: 0.0,
            home_advantage_elo: 50.0,
            rest_elo_per_day: 15.0,
            b2b_penalty_elo: 30.0,
            star_out_penalty_elo: 50.0,
            min_prob: Decimal::new(5, 0),
            max_prob: Decimal::new(95, 0),
        }
    }
}

/// Model configuration for 3-way (draw-possible) sports
#[derive(Debug, Clone, Deserialize)]
pub struct ThreeWayModelConfig {
    /// K-factor for rating updates
    #[serde(default = "default_three_way_k")]
    pub k_factor: f64,

    /// Home advantage baked into rating updates (Elo points)
    #[serde(default)]
    pub update_home_advantage: f64,

    /// Home advantage applied before prediction (Elo points)
    #[serde(default = "default_home_advantage_three_way")]
    pub home_advantage_elo: f64,

    /// Elo points per unit of recent-form score
    #[serde(default = "default_form_elo_scale")]
    pub form_elo_scale: f64,

    /// Elo points per goal of goal-difference advantage
    #[serde(default = "default_goal_diff_elo")]
    pub goal_diff_elo_per_goal: f64,

    /// Goal-difference advantage is capped at this many goals
    #[serde(default = "default_goal_diff_cap")]
    pub goal_diff_cap: i64,

    /// Baseline draw probability before favourite strength shrinks it
    #[serde(default = "default_base_draw_prob")]
    pub base_draw_prob: Decimal,

    /// Home/away probability clamp band (%)
    #[serde(default = "default_min_prob_three_way")]
    pub min_prob: Decimal,
    #[serde(default = "default_max_prob_three_way")]
    pub max_prob: Decimal,

    /// Draw probability clamp band (%), narrower than the win bands
    #[serde(default = "default_draw_min_prob")]
    pub draw_min_prob: Decimal,
    #[serde(default = "default_draw_max_prob")]
    pub draw_max_prob: Decimal,
}

fn default_three_way_k() -> f64 {
    32.0
}
fn default_home_advantage_three_way() -> f64 {
    60.0
}
fn default_form_elo_scale() -> f64 {
    100.0
}
fn default_goal_diff_elo() -> f64 {
    5.0
}
fn default_goal_diff_cap() -> i64 {
    5
}
fn default_base_draw_prob() -> Decimal {
    Decimal::new(25, 2) // 0.25
}
fn default_min_prob_three_way() -> Decimal {
    Decimal::new(5, 0)
}
fn default_max_prob_three_way() -> Decimal {
    Decimal::new(85, 0)
}
fn default_draw_min_prob() -> Decimal {
    Decimal::new(10, 0)
}
fn default_draw_max_prob() -> Decimal {
    Decimal::new(40, 0)
}

impl Default for ThreeWayModelConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            update_home_advantage: 0.0,
            home_advantage_elo: 60.0,
            form_elo_scale: 100.0,
            goal_diff_elo_per_goal: 5.0,
            goal_diff_cap: 5,
            base_draw_prob: Decimal::new(25, 2),
            min_prob: Decimal::new(5, 0),
            max_prob: Decimal::new(85, 0),
            draw_min_prob: Decimal::new(10, 0),
            draw_max_prob: Decimal::new(40, 0),
        }
    }
}

/// Market calibration configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationConfig {
    /// Shrink factor toward market probabilities (0 disables calibration)
    #[serde(default = "default_shrink")]
    pub shrink: Decimal,
}

fn default_shrink() -> Decimal {
    Decimal::new(3, 1) // 0.3
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            shrink: Decimal::new(3, 1),
        }
    }
}

/// Staking mode: flat percentage or fractional Kelly
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StakeMode {
    #[default]
    Flat,
    Kelly,
}

/// Bet sizing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StakingConfig {
    #[serde(default)]
    pub mode: StakeMode,

    /// Fraction of Kelly to use (0.5 = half Kelly)
    #[serde(default = "default_kelly_multiplier")]
    pub kelly_multiplier: Decimal,

    /// Maximum stake as percentage of bankroll
    #[serde(default = "default_max_stake_pct")]
    pub max_stake_pct: Decimal,

    /// Flat staking percentage of bankroll
    #[serde(default = "default_flat_stake_pct")]
    pub flat_stake_pct: Decimal,

    /// Starting bankroll
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
}

fn default_kelly_multiplier() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_max_stake_pct() -> Decimal {
    Decimal::new(5, 0) // 5%
}
fn default_flat_stake_pct() -> Decimal {
    Decimal::new(15, 1) // 1.5%
}
fn default_bankroll() -> Decimal {
    Decimal::new(1000, 0)
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            mode: StakeMode::Flat,
            kelly_multiplier: Decimal::new(5, 1),
            max_stake_pct: Decimal::new(5, 0),
            flat_stake_pct: Decimal::new(15, 1),
            bankroll: Decimal::new(1000, 0),
        }
    }
}

/// Recommendation gating: both thresholds must pass before a bet is suggested
#[derive(Debug, Clone, Deserialize)]
pub struct GatingConfig {
    /// Minimum model probability (%) for the favoured outcome
    #[serde(default = "default_min_favorite_prob")]
    pub min_favorite_prob: Decimal,

    /// Minimum edge (percentage points) over the market
    #[serde(default = "default_min_edge")]
    pub min_edge: Decimal,
}

fn default_min_favorite_prob() -> Decimal {
    Decimal::new(62, 0)
}
fn default_min_edge() -> Decimal {
    Decimal::new(1, 0)
}

impl Default for GatingConfig {
    fn default() -> Self {
        Self {
            min_favorite_prob: Decimal::new(62, 0),
            min_edge: Decimal::new(1, 0),
        }
    }
}

/// Bet storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("elo_edge.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Results provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// API key; falls back to the RESULTS_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider_url() -> String {
    "https://api.balldontlie.io".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
