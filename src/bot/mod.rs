//! Betting bot orchestrator
//!
//! Wires the rating store, predictors, staking engine and storage together:
//! odds in, structured analysis out, bets and rating updates persisted. All
//! formatting stays in the CLI layer; everything returned here is plain data.

mod error;

pub use error::BotError;

use crate::config::{Config, GatingConfig};
use crate::db::{BetRecord, BetResult, BetStats, Database, NewBet};
use crate::odds::{
    decimal_to_implied_prob, moneyline_to_decimal, moneyline_to_implied_prob,
    remove_vig_three_way, remove_vig_two_way, ThreeWayProbs, TwoWayProbs,
};
use crate::predict::{
    GameContext, MatchContext, Outcome, RatingDiagnostics, Sport, ThreeWayPredictor,
    TwoWayPredictor,
};
use crate::provider::GameRecord;
use crate::ratings::{update, MatchOutcome, RatingStore};
use crate::staking::StakeSizer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Market quote for a 2-way game: exactly one odds format.
#[derive(Debug, Clone, Copy)]
pub enum TwoWayOdds {
    Moneyline { home: Decimal, away: Decimal },
    Decimal { home: Decimal, away: Decimal },
}

impl TwoWayOdds {
    /// Build from optional CLI-style inputs, failing fast unless exactly one
    /// complete pair is present.
    pub fn from_parts(
        home_ml: Option<Decimal>,
        away_ml: Option<Decimal>,
        home_odds: Option<Decimal>,
        away_odds: Option<Decimal>,
    ) -> Result<Self, BotError> {
        match (home_ml, away_ml, home_odds, away_odds) {
            (Some(home), Some(away), None, None) => Ok(TwoWayOdds::Moneyline { home, away }),
            (None, None, Some(home), Some(away)) => Ok(TwoWayOdds::Decimal { home, away }),
            _ => Err(BotError::MissingOdds),
        }
    }

    /// Implied probabilities (%) for both sides, vig included.
    pub fn implied(&self) -> (Decimal, Decimal) {
        match self {
            TwoWayOdds::Moneyline { home, away } => (
                moneyline_to_implied_prob(*home),
                moneyline_to_implied_prob(*away),
            ),
            TwoWayOdds::Decimal { home, away } => (
                decimal_to_implied_prob(*home),
                decimal_to_implied_prob(*away),
            ),
        }
    }

    /// Decimal odds actually available to bet at.
    pub fn decimal_odds(&self) -> (Decimal, Decimal) {
        match self {
            TwoWayOdds::Moneyline { home, away } => {
                (moneyline_to_decimal(*home), moneyline_to_decimal(*away))
            }
            TwoWayOdds::Decimal { home, away } => (*home, *away),
        }
    }
}

/// Per-outcome edge: model probability minus market probability, in points.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TwoWayEdges {
    pub home: Decimal,
    pub away: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThreeWayEdges {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
}

/// A recommended bet, produced only when both gates pass.
#[derive(Debug, Clone, Serialize)]
pub struct BetRecommendation {
    pub outcome: Outcome,
    pub odds: Decimal,
    pub stake: Decimal,
    pub edge: Decimal,
    pub true_probability: Decimal,
    pub market_probability: Decimal,
    pub potential_return: Decimal,
    pub potential_profit: Decimal,
}

/// Structured 2-way analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct GameAnalysis {
    pub home_team: String,
    pub away_team: String,
    pub market_probabilities: TwoWayProbs,
    pub true_probabilities: TwoWayProbs,
    pub edges: TwoWayEdges,
    pub home_rating: f64,
    pub away_rating: f64,
    pub recommendation: Option<BetRecommendation>,
    pub calibration_applied: bool,
    pub diagnostics: Option<RatingDiagnostics>,
}

/// Structured 3-way analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub home_team: String,
    pub away_team: String,
    pub market_probabilities: ThreeWayProbs,
    pub true_probabilities: ThreeWayProbs,
    pub edges: ThreeWayEdges,
    pub home_rating: f64,
    pub away_rating: f64,
    pub recommendation: Option<BetRecommendation>,
    pub calibration_applied: bool,
    pub diagnostics: Option<RatingDiagnostics>,
}

/// Betting statistics plus the live bankroll.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub bets: BetStats,
    pub bankroll: Decimal,
}

struct UpdateParams {
    k: f64,
    home_adv: f64,
}

/// Main orchestrator: owns the rating store, the database handle and the
/// bankroll.
pub struct BettingBot {
    store: RatingStore,
    db: Database,
    two_way: TwoWayPredictor,
    three_way: ThreeWayPredictor,
    sizer: StakeSizer,
    gating: GatingConfig,
    two_way_update: UpdateParams,
    three_way_update: UpdateParams,
    bankroll: Decimal,
}

impl BettingBot {
    /// Build a bot from configuration, loading persisted ratings.
    pub fn new(config: &Config, db: Database) -> anyhow::Result<Self> {
        let mut store = RatingStore::new(config.elo.initial_rating);
        let saved = db.load_team_ratings()?;
        if !saved.is_empty() {
            tracing::debug!(teams = saved.len(), "loaded persisted ratings");
        }
        store.load(saved);

        Ok(Self {
            store,
            db,
            two_way: TwoWayPredictor::new(config.two_way.clone(), &config.calibration),
            three_way: ThreeWayPredictor::new(config.three_way.clone(), &config.calibration),
            sizer: StakeSizer::from_config(&config.staking),
            gating: config.gating.clone(),
            two_way_update: UpdateParams {
                k: config.two_way.k_factor,
                home_adv: config.two_way.update_home_advantage,
            },
            three_way_update: UpdateParams {
                k: config.three_way.k_factor,
                home_adv: config.three_way.update_home_advantage,
            },
            bankroll: config.staking.bankroll,
        })
    }

    pub fn bankroll(&self) -> Decimal {
        self.bankroll
    }

    /// Current rating for a team (lazily initialised).
    pub fn rating(&mut self, team: &str) -> f64 {
        self.store.rating(team)
    }

    /// Analyse a 2-way game against the quoted odds.
    pub fn analyze_game(
        &mut self,
        ctx: &GameContext,
        odds: &TwoWayOdds,
        use_calibration: bool,
        with_diagnostics: bool,
    ) -> GameAnalysis {
        let (home_implied, away_implied) = odds.implied();
        let market = remove_vig_two_way(home_implied, away_implied);

        let market_for_model = if use_calibration { Some(&market) } else { None };
        let (model, diag) = self
            .two_way
            .predict_detailed(&mut self.store, ctx, market_for_model);

        let edges = TwoWayEdges {
            home: (model.home - market.home).round_dp(2),
            away: (model.away - market.away).round_dp(2),
        };

        let (home_bet_odds, away_bet_odds) = odds.decimal_odds();
        let favourite = if model.home >= model.away {
            (Outcome::Home, model.home, market.home, home_bet_odds)
        } else {
            (Outcome::Away, model.away, market.away, away_bet_odds)
        };
        let recommendation = self.recommend(favourite);

        GameAnalysis {
            home_team: ctx.home_team.clone(),
            away_team: ctx.away_team.clone(),
            market_probabilities: TwoWayProbs::new(
                market.home.round_dp(2),
                market.away.round_dp(2),
            ),
            true_probabilities: TwoWayProbs::new(model.home.round_dp(2), model.away.round_dp(2)),
            edges,
            home_rating: diag.home_rating.round(),
            away_rating: diag.away_rating.round(),
            recommendation,
            calibration_applied: use_calibration,
            diagnostics: with_diagnostics.then_some(diag),
        }
    }

    /// Analyse a 3-way match quoted in decimal odds.
    pub fn analyze_match(
        &mut self,
        ctx: &MatchContext,
        home_odds: Decimal,
        draw_odds: Decimal,
        away_odds: Decimal,
        use_calibration: bool,
        with_diagnostics: bool,
    ) -> MatchAnalysis {
        let market = remove_vig_three_way(
            decimal_to_implied_prob(home_odds),
            decimal_to_implied_prob(draw_odds),
            decimal_to_implied_prob(away_odds),
        );

        let market_for_model = if use_calibration { Some(&market) } else { None };
        let (model, diag) = self
            .three_way
            .predict_detailed(&mut self.store, ctx, market_for_model);

        let edges = ThreeWayEdges {
            home: (model.home - market.home).round_dp(2),
            draw: (model.draw - market.draw).round_dp(2),
            away: (model.away - market.away).round_dp(2),
        };

        // Single most-probable outcome only; a draw favourite is never backed
        let mut favourite = (Outcome::Home, model.home, market.home, home_odds);
        if model.draw > favourite.1 {
            favourite = (Outcome::Draw, model.draw, market.draw, draw_odds);
        }
        if model.away > favourite.1 {
            favourite = (Outcome::Away, model.away, market.away, away_odds);
        }
        let recommendation = if favourite.0 == Outcome::Draw {
            None
        } else {
            self.recommend(favourite)
        };

        MatchAnalysis {
            home_team: ctx.home_team.clone(),
            away_team: ctx.away_team.clone(),
            market_probabilities: ThreeWayProbs::new(
                market.home.round_dp(2),
                market.draw.round_dp(2),
                market.away.round_dp(2),
            ),
            true_probabilities: ThreeWayProbs::new(
                model.home.round_dp(2),
                model.draw.round_dp(2),
                model.away.round_dp(2),
            ),
            edges,
            home_rating: diag.home_rating.round(),
            away_rating: diag.away_rating.round(),
            recommendation,
            calibration_applied: use_calibration,
            diagnostics: with_diagnostics.then_some(diag),
        }
    }

    fn recommend(
        &self,
        (outcome, model_prob, market_prob, odds): (Outcome, Decimal, Decimal, Decimal),
    ) -> Option<BetRecommendation> {
        let edge = model_prob - market_prob;
        if model_prob < self.gating.min_favorite_prob || edge < self.gating.min_edge {
            return None;
        }

        let stake = self
            .sizer
            .bet_size(self.bankroll, model_prob / dec!(100), odds)
            .round_dp(2);
        Some(BetRecommendation {
            outcome,
            odds: odds.round_dp(4),
            stake,
            edge: edge.round_dp(2),
            true_probability: model_prob.round_dp(2),
            market_probability: market_prob.round_dp(2),
            potential_return: (stake * odds).round_dp(2),
            potential_profit: (stake * (odds - Decimal::ONE)).round_dp(2),
        })
    }

    /// Persist a bet and deduct its stake from the bankroll.
    pub fn place_bet(&mut self, bet: NewBet) -> anyhow::Result<i64> {
        let stake = bet.stake;
        let id = self.db.add_bet(&bet)?;
        self.bankroll -= stake;
        tracing::info!(bet_id = id, %stake, bankroll = %self.bankroll, "bet placed");
        Ok(id)
    }

    /// Settle a bet, adjusting the bankroll; returns the profit/loss.
    pub fn settle_bet(&mut self, bet_id: i64, result: BetResult) -> Result<Decimal, BotError> {
        let bet = self.db.bet(bet_id)?.ok_or(BotError::UnknownBet(bet_id))?;

        let profit_loss = match result {
            BetResult::Win => {
                let profit = bet.stake * (bet.odds - Decimal::ONE);
                self.bankroll += bet.stake + profit;
                profit
            }
            BetResult::Loss => -bet.stake,
            BetResult::Push => {
                self.bankroll += bet.stake;
                Decimal::ZERO
            }
        };

        self.db.settle_bet(bet_id, result, profit_loss)?;
        tracing::info!(bet_id, result = result.as_str(), %profit_loss, "bet settled");
        Ok(profit_loss)
    }

    /// Apply a final score: update both Elo ratings and persist them, plus the
    /// result row when a date is known.
    pub fn record_result(
        &mut self,
        sport: Sport,
        home_team: &str,
        away_team: &str,
        home_score: i64,
        away_score: i64,
        game_date: Option<&str>,
    ) -> anyhow::Result<()> {
        let outcome = MatchOutcome::from_scores(home_score, away_score);
        let params = match sport {
            Sport::Basketball => &self.two_way_update,
            Sport::Soccer => &self.three_way_update,
        };

        let r_home = self.store.rating(home_team);
        let r_away = self.store.rating(away_team);
        let (new_home, new_away) = update(r_home, r_away, outcome, params.k, params.home_adv);

        self.store.set_rating(home_team, new_home);
        self.store.set_rating(away_team, new_away);
        self.db.save_team_rating(home_team, new_home)?;
        self.db.save_team_rating(away_team, new_away)?;

        if let Some(date) = game_date {
            self.db
                .add_game_result(sport, date, home_team, away_team, home_score, away_score)?;
        }

        tracing::info!(
            home = home_team,
            away = away_team,
            new_home,
            new_away,
            "ratings updated"
        );
        Ok(())
    }

    /// Run every final game in a provider batch through `record_result`.
    /// Returns how many were applied.
    pub fn apply_final_results(
        &mut self,
        sport: Sport,
        games: &[GameRecord],
    ) -> anyhow::Result<usize> {
        let mut applied = 0;
        for game in games.iter().filter(|g| g.is_final()) {
            self.record_result(
                sport,
                &game.home_team,
                &game.away_team,
                game.home_score,
                game.away_score,
                Some(&game.date),
            )?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Import ratings from tabular text; returns how many rows were applied.
    pub fn import_ratings(&mut self, table: &str) -> anyhow::Result<usize> {
        let rows = crate::provider::parse_ratings_table(table);
        for (team, rating) in &rows {
            self.store.set_rating(team, *rating);
            self.db.save_team_rating(team, *rating)?;
        }
        Ok(rows.len())
    }

    /// Manually override one team's rating and persist it.
    pub fn set_rating(&mut self, team: &str, value: f64) -> anyhow::Result<()> {
        self.store.set_rating(team, value);
        self.db.save_team_rating(team, value)?;
        Ok(())
    }

    pub fn statistics(&self) -> anyhow::Result<Statistics> {
        Ok(Statistics {
            bets: self.db.stats()?,
            bankroll: self.bankroll,
        })
    }

    pub fn pending_bets(&self) -> anyhow::Result<Vec<BetRecord>> {
        self.db.pending_bets()
    }

    pub fn all_bets(&self) -> anyhow::Result<Vec<BetRecord>> {
        self.db.all_bets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bot() -> BettingBot {
        BettingBot::new(&Config::default(), Database::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_odds_input_exactly_one_pair() {
        assert!(matches!(
            TwoWayOdds::from_parts(None, None, None, None),
            Err(BotError::MissingOdds)
        ));
        // Half a pair is not enough
        assert!(matches!(
            TwoWayOdds::from_parts(Some(dec!(-150)), None, None, None),
            Err(BotError::MissingOdds)
        ));
        // Both pairs is ambiguous
        assert!(matches!(
            TwoWayOdds::from_parts(
                Some(dec!(-150)),
                Some(dec!(130)),
                Some(dec!(1.67)),
                Some(dec!(2.30))
            ),
            Err(BotError::MissingOdds)
        ));
        assert!(TwoWayOdds::from_parts(Some(dec!(-150)), Some(dec!(130)), None, None).is_ok());
        assert!(TwoWayOdds::from_parts(None, None, Some(dec!(1.67)), Some(dec!(2.30))).is_ok());
    }

    #[test]
    fn test_analyze_game_moneyline_market() {
        let mut bot = test_bot();
        let odds = TwoWayOdds::from_parts(Some(dec!(-150)), Some(dec!(130)), None, None).unwrap();

        let analysis = bot.analyze_game(&GameContext::new("BOS", "LAL"), &odds, true, false);

        let market = analysis.market_probabilities;
        assert!((market.home + market.away - dec!(100)).abs() < dec!(0.01));
        assert!(market.home > market.away);
        let model = analysis.true_probabilities;
        assert!((model.home + model.away - dec!(100)).abs() < dec!(0.01));
        assert!(analysis.calibration_applied);
        assert!(analysis.diagnostics.is_none());
    }

    #[test]
    fn test_no_recommendation_without_edge() {
        let mut bot = test_bot();
        // Equal 1500 ratings vs a fair market: favourite never clears 62%
        let odds = TwoWayOdds::from_parts(None, None, Some(dec!(1.9)), Some(dec!(1.9))).unwrap();
        let analysis = bot.analyze_game(&GameContext::new("BOS", "LAL"), &odds, true, false);
        assert!(analysis.recommendation.is_none());
    }

    #[test]
    fn test_recommendation_when_gates_pass() {
        let mut bot = test_bot();
        bot.set_rating("BOS", 1750.0).unwrap();
        bot.set_rating("LAL", 1450.0).unwrap();

        // Market underrates the favourite
        let odds = TwoWayOdds::from_parts(None, None, Some(dec!(1.9)), Some(dec!(1.9))).unwrap();
        let analysis = bot.analyze_game(&GameContext::new("BOS", "LAL"), &odds, false, false);

        let rec = analysis.recommendation.expect("expected a recommendation");
        assert_eq!(rec.outcome, Outcome::Home);
        // Flat staking: 1.5% of the 1000 bankroll
        assert_eq!(rec.stake, dec!(15));
        assert_eq!(rec.potential_return, (rec.stake * rec.odds).round_dp(2));
        assert!(rec.edge >= dec!(1));
    }

    #[test]
    fn test_analyze_match_three_way() {
        let mut bot = test_bot();
        let analysis = bot.analyze_match(
            &MatchContext::new("Arsenal", "Chelsea"),
            dec!(2.10),
            dec!(3.40),
            dec!(3.60),
            true,
            true,
        );

        let market = analysis.market_probabilities;
        assert!((market.home + market.draw + market.away - dec!(100)).abs() < dec!(0.01));
        let model = analysis.true_probabilities;
        assert!((model.home + model.draw + model.away - dec!(100)).abs() < dec!(0.01));
        assert!(analysis.diagnostics.is_some());
    }

    #[test]
    fn test_place_and_settle_win_adjusts_bankroll() {
        let mut bot = test_bot();
        let id = bot
            .place_bet(NewBet {
                home_team: "BOS".to_string(),
                away_team: "LAL".to_string(),
                bet_type: Outcome::Home,
                odds: dec!(2.0),
                stake: dec!(15),
                true_probability: dec!(64),
                market_probability: dec!(58),
                edge: dec!(6),
                match_date: None,
                sport: Sport::Basketball,
            })
            .unwrap();
        assert_eq!(bot.bankroll(), dec!(985));

        let pl = bot.settle_bet(id, BetResult::Win).unwrap();
        assert_eq!(pl, dec!(15));
        assert_eq!(bot.bankroll(), dec!(1015));
    }

    #[test]
    fn test_settle_push_refunds_stake() {
        let mut bot = test_bot();
        let id = bot
            .place_bet(NewBet {
                home_team: "BOS".to_string(),
                away_team: "LAL".to_string(),
                bet_type: Outcome::Home,
                odds: dec!(1.8),
                stake: dec!(20),
                true_probability: dec!(64),
                market_probability: dec!(58),
                edge: dec!(6),
                match_date: None,
                sport: Sport::Basketball,
            })
            .unwrap();

        let pl = bot.settle_bet(id, BetResult::Push).unwrap();
        assert_eq!(pl, Decimal::ZERO);
        assert_eq!(bot.bankroll(), dec!(1000));
    }

    #[test]
    fn test_settle_unknown_bet_fails() {
        let mut bot = test_bot();
        assert!(matches!(
            bot.settle_bet(99, BetResult::Win),
            Err(BotError::UnknownBet(99))
        ));
    }

    #[test]
    fn test_record_result_moves_and_persists_ratings() {
        let mut bot = test_bot();
        bot.record_result(Sport::Basketball, "BOS", "LAL", 112, 104, Some("2025-01-15"))
            .unwrap();

        // Winner gains exactly what the loser drops
        let home = bot.rating("BOS");
        let away = bot.rating("LAL");
        assert!(home > 1500.0);
        assert!(away < 1500.0);
        assert!((home - 1500.0 + (away - 1500.0)).abs() < 1e-9);

        let persisted = bot.db.load_team_ratings().unwrap();
        assert_eq!(persisted["Boston Celtics"], home);
    }

    #[test]
    fn test_apply_final_results_skips_unfinished() {
        let mut bot = test_bot();
        let games = vec![
            GameRecord {
                date: "2025-01-15".to_string(),
                home_team: "BOS".to_string(),
                away_team: "LAL".to_string(),
                home_score: 112,
                away_score: 104,
                status: "Final".to_string(),
            },
            GameRecord {
                date: "2025-01-15".to_string(),
                home_team: "MIA".to_string(),
                away_team: "NYK".to_string(),
                home_score: 55,
                away_score: 60,
                status: "Halftime".to_string(),
            },
        ];

        let applied = bot.apply_final_results(Sport::Basketball, &games).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(bot.rating("Miami Heat"), 1500.0);
    }

    #[test]
    fn test_import_ratings_applies_and_persists() {
        let mut bot = test_bot();
        let count = bot
            .import_ratings("team_name,elo\nBOS,1612.5\nbad-row,not-a-number\nLAL,1540\n")
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(bot.rating("Boston Celtics"), 1612.5);

        let persisted = bot.db.load_team_ratings().unwrap();
        assert_eq!(persisted["Los Angeles Lakers"], 1540.0);
    }

    #[test]
    fn test_statistics_include_bankroll() {
        let bot = test_bot();
        let stats = bot.statistics().unwrap();
        assert_eq!(stats.bankroll, dec!(1000));
        assert_eq!(stats.bets.total_bets, 0);
    }
}
