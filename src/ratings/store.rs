//! In-memory rating store

use super::names::canonical_team_name;
use std::collections::HashMap;

/// Map of canonical team name to current Elo rating.
///
/// Unknown teams are lazily created at the configured initial rating, so a
/// read can cause a write; repeated reads without intervening writes always
/// return the same value. Entries are never deleted.
#[derive(Debug, Clone)]
pub struct RatingStore {
    ratings: HashMap<String, f64>,
    initial_rating: f64,
}

impl RatingStore {
    /// Create an empty store with the given initial rating for new teams.
    pub fn new(initial_rating: f64) -> Self {
        Self {
            ratings: HashMap::new(),
            initial_rating,
        }
    }

    /// Current rating for a team, initialising it if unseen.
    pub fn rating(&mut self, team: &str) -> f64 {
        let key = canonical_team_name(team);
        *self.ratings.entry(key).or_insert(self.initial_rating)
    }

    /// Directly overwrite a team's rating (manual override, Elo update,
    /// ratings import).
    pub fn set_rating(&mut self, team: &str, value: f64) {
        let key = canonical_team_name(team);
        self.ratings.insert(key, value);
    }

    /// Merge previously persisted ratings into the store.
    pub fn load(&mut self, saved: impl IntoIterator<Item = (String, f64)>) {
        for (team, rating) in saved {
            self.set_rating(&team, rating);
        }
    }

    /// All known (canonical name, rating) entries.
    pub fn all(&self) -> &HashMap<String, f64> {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}
