//! SQLite persistence for bets, team ratings and game results
//!
//! This is the storage collaborator: the prediction engine never calls in
//! here directly. The schema keeps a `sport` tag on bets and results so one
//! database can serve both market shapes.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::predict::{Outcome, Sport};
use crate::ratings::canonical_team_name;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS bets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    home_team TEXT NOT NULL,
    away_team TEXT NOT NULL,
    bet_type TEXT NOT NULL,
    odds REAL NOT NULL,
    stake REAL NOT NULL,
    true_probability REAL NOT NULL,
    market_probability REAL NOT NULL,
    edge REAL NOT NULL,
    result TEXT,
    profit_loss REAL,
    match_date TEXT,
    sport TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS team_ratings (
    team_name TEXT PRIMARY KEY,
    elo_rating REAL NOT NULL,
    last_updated TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS game_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_date TEXT NOT NULL,
    home_team TEXT NOT NULL,
    away_team TEXT NOT NULL,
    home_score INTEGER NOT NULL,
    away_score INTEGER NOT NULL,
    sport TEXT NOT NULL
);
"#;

/// Settlement result of a bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Win,
    Loss,
    /// Voided / refunded stake
    Push,
}

impl BetResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetResult::Win => "win",
            BetResult::Loss => "loss",
            BetResult::Push => "push",
        }
    }
}

impl std::str::FromStr for BetResult {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win" => Ok(BetResult::Win),
            "loss" => Ok(BetResult::Loss),
            "push" => Ok(BetResult::Push),
            other => Err(format!("unknown bet result: {other}")),
        }
    }
}

/// A bet at placement time
#[derive(Debug, Clone)]
pub struct NewBet {
    pub home_team: String,
    pub away_team: String,
    pub bet_type: Outcome,
    pub odds: Decimal,
    pub stake: Decimal,
    pub true_probability: Decimal,
    pub market_probability: Decimal,
    pub edge: Decimal,
    pub match_date: Option<String>,
    pub sport: Sport,
}

/// A persisted bet
#[derive(Debug, Clone, Serialize)]
pub struct BetRecord {
    pub id: i64,
    pub timestamp: String,
    pub home_team: String,
    pub away_team: String,
    pub bet_type: Outcome,
    pub odds: Decimal,
    pub stake: Decimal,
    pub true_probability: Decimal,
    pub market_probability: Decimal,
    pub edge: Decimal,
    pub result: Option<BetResult>,
    pub profit_loss: Option<Decimal>,
    pub match_date: Option<String>,
    pub sport: Sport,
}

/// Aggregated betting statistics. Plain data; formatting belongs elsewhere
#[derive(Debug, Clone, Serialize)]
pub struct BetStats {
    pub total_bets: i64,
    pub settled_bets: i64,
    pub pending_bets: i64,
    pub wins: i64,
    pub losses: i64,
    /// Percentage of settled bets won
    pub win_rate: f64,
    pub total_staked: Decimal,
    pub total_profit_loss: Decimal,
    /// Profit over total staked, as a percentage
    pub roi: f64,
}

/// SQLite-backed store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (and initialise) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("opening database at {}", path.as_ref().display()))?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .context("initialising schema")?;
        Ok(())
    }

    /// Record a new bet; returns its id.
    pub fn add_bet(&self, bet: &NewBet) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO bets (
                    timestamp, home_team, away_team, bet_type, odds, stake,
                    true_probability, market_probability, edge, match_date, sport
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    Utc::now().to_rfc3339(),
                    canonical_team_name(&bet.home_team),
                    canonical_team_name(&bet.away_team),
                    bet.bet_type.as_str(),
                    bet.odds.to_f64().unwrap_or(0.0),
                    bet.stake.to_f64().unwrap_or(0.0),
                    bet.true_probability.to_f64().unwrap_or(0.0),
                    bet.market_probability.to_f64().unwrap_or(0.0),
                    bet.edge.to_f64().unwrap_or(0.0),
                    bet.match_date,
                    bet.sport.as_str(),
                ],
            )
            .context("inserting bet")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record a bet's final result and profit/loss.
    pub fn settle_bet(&self, bet_id: i64, result: BetResult, profit_loss: Decimal) -> Result<()> {
        self.conn
            .execute(
                "UPDATE bets SET result = ?1, profit_loss = ?2 WHERE id = ?3",
                params![
                    result.as_str(),
                    profit_loss.to_f64().unwrap_or(0.0),
                    bet_id
                ],
            )
            .context("settling bet")?;
        Ok(())
    }

    /// Look up one bet.
    pub fn bet(&self, bet_id: i64) -> Result<Option<BetRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT * FROM bets WHERE id = ?1",
                params![bet_id],
                row_to_bet,
            )
            .optional()
            .context("querying bet")?;
        Ok(record)
    }

    pub fn all_bets(&self) -> Result<Vec<BetRecord>> {
        self.query_bets("SELECT * FROM bets ORDER BY id")
    }

    /// Bets that have not been settled yet.
    pub fn pending_bets(&self) -> Result<Vec<BetRecord>> {
        self.query_bets("SELECT * FROM bets WHERE result IS NULL ORDER BY id")
    }

    fn query_bets(&self, sql: &str) -> Result<Vec<BetRecord>> {
        let mut stmt = self.conn.prepare(sql).context("preparing bet query")?;
        let rows = stmt
            .query_map([], row_to_bet)
            .context("querying bets")?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Persist a team's rating under its canonical name.
    pub fn save_team_rating(&self, team: &str, elo_rating: f64) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO team_ratings (team_name, elo_rating, last_updated)
                 VALUES (?1, ?2, ?3)",
                params![
                    canonical_team_name(team),
                    elo_rating,
                    Utc::now().to_rfc3339()
                ],
            )
            .context("saving team rating")?;
        Ok(())
    }

    /// All persisted ratings, keyed by canonical name.
    pub fn load_team_ratings(&self) -> Result<HashMap<String, f64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_name, elo_rating FROM team_ratings")
            .context("preparing ratings query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .context("loading team ratings")?;

        let mut ratings = HashMap::new();
        for row in rows {
            let (name, rating) = row?;
            ratings.insert(canonical_team_name(&name), rating);
        }
        Ok(ratings)
    }

    /// Record a final score.
    pub fn add_game_result(
        &self,
        sport: Sport,
        game_date: &str,
        home_team: &str,
        away_team: &str,
        home_score: i64,
        away_score: i64,
    ) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO game_results (
                    game_date, home_team, away_team, home_score, away_score, sport
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    game_date,
                    canonical_team_name(home_team),
                    canonical_team_name(away_team),
                    home_score,
                    away_score,
                    sport.as_str(),
                ],
            )
            .context("recording game result")?;
        Ok(())
    }

    /// Aggregate betting statistics.
    pub fn stats(&self) -> Result<BetStats> {
        let total_bets: i64 = self.scalar("SELECT COUNT(*) FROM bets")?;
        let settled_bets: i64 = self.scalar("SELECT COUNT(*) FROM bets WHERE result IS NOT NULL")?;
        let wins: i64 = self.scalar("SELECT COUNT(*) FROM bets WHERE result = 'win'")?;
        let total_staked: f64 = self.scalar("SELECT COALESCE(SUM(stake), 0) FROM bets")?;
        let total_pl: f64 = self.scalar(
            "SELECT COALESCE(SUM(profit_loss), 0) FROM bets WHERE profit_loss IS NOT NULL",
        )?;

        let win_rate = if settled_bets > 0 {
            wins as f64 / settled_bets as f64 * 100.0
        } else {
            0.0
        };
        let roi = if total_staked > 0.0 {
            total_pl / total_staked * 100.0
        } else {
            0.0
        };

        Ok(BetStats {
            total_bets,
            settled_bets,
            pending_bets: total_bets - settled_bets,
            wins,
            losses: settled_bets - wins,
            win_rate,
            total_staked: Decimal::try_from(total_staked).unwrap_or_default(),
            total_profit_loss: Decimal::try_from(total_pl).unwrap_or_default(),
            roi,
        })
    }

    fn scalar<T: rusqlite::types::FromSql>(&self, sql: &str) -> Result<T> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .with_context(|| format!("running {sql}"))
    }
}

fn row_to_bet(row: &Row<'_>) -> rusqlite::Result<BetRecord> {
    let bet_type: String = row.get("bet_type")?;
    let result: Option<String> = row.get("result")?;
    let sport: String = row.get("sport")?;

    Ok(BetRecord {
        id: row.get("id")?,
        timestamp: row.get("timestamp")?,
        home_team: row.get("home_team")?,
        away_team: row.get("away_team")?,
        bet_type: parse_text_column(&bet_type, 4)?,
        odds: decimal_column(row, "odds")?,
        stake: decimal_column(row, "stake")?,
        true_probability: decimal_column(row, "true_probability")?,
        market_probability: decimal_column(row, "market_probability")?,
        edge: decimal_column(row, "edge")?,
        result: result.as_deref().map(|s| parse_text_column(s, 10)).transpose()?,
        profit_loss: row
            .get::<_, Option<f64>>("profit_loss")?
            .map(|v| Decimal::try_from(v).unwrap_or_default()),
        match_date: row.get("match_date")?,
        sport: parse_text_column(&sport, 13)?,
    })
}

fn decimal_column(row: &Row<'_>, name: &str) -> rusqlite::Result<Decimal> {
    let value: f64 = row.get(name)?;
    Ok(Decimal::try_from(value).unwrap_or_default())
}

fn parse_text_column<T: std::str::FromStr<Err = String>>(
    value: &str,
    idx: usize,
) -> rusqlite::Result<T> {
    value.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}
