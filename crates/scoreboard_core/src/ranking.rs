//! Player registry and rank ordering.
//!
//! [`Scoreboard`] owns the registry and a cached standings order. Every
//! mutation recomputes the order before returning, so rank lookups always
//! see the current state. The ordering rule: descending score, ties broken
//! by ascending name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoreboardError;
use crate::types::{
    Selector, DEFAULT_MAX_PLAYERS, HARD_MAX_PLAYERS, MAX_NAME_LEN, MAX_SCORE, MIN_SCORE,
    NAME_HARD_CAP,
};

/// A single player record. The name is the identity; renaming a player
/// changes its identity while keeping the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i32,
}

/// One entry of the history log, recorded on every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    Added { name: String, score: i32 },
    Removed { name: String, score: i32 },
    Renamed { from: String, to: String },
    ScoreChanged { name: String, from: i32, to: i32 },
    ResetAll,
    Cleared,
}

/// The ranking engine: player registry plus derived standings.
///
/// Players live in an arena; a name lookup table maps each name to its
/// arena slot and the standings hold arena slots in rank order. Ranks are
/// 1-based positions in the standings and are never stored.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    players: Vec<Player>,
    by_name: HashMap<String, usize>,
    standings: Vec<usize>,
    max_players: u32,
    show_max: Option<u32>,
    history: Vec<HistoryEvent>,
}

fn clamp_score(value: i64) -> i32 {
    value.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as i32
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Scoreboard {
            players: Vec::new(),
            by_name: HashMap::new(),
            standings: Vec::new(),
            max_players: DEFAULT_MAX_PLAYERS,
            show_max: None,
            history: Vec::new(),
        }
    }

    /// Number of players currently registered.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Current player limit.
    pub fn max_players(&self) -> u32 {
        self.max_players
    }

    /// Display cap, if one was set. `None` means show everything.
    pub fn show_max(&self) -> Option<u32> {
        self.show_max
    }

    /// Score of the player with this exact stored name.
    pub fn score_of(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).map(|&idx| self.players[idx].score)
    }

    /// Current rank order as `(rank, name, score)`, best first.
    pub fn standings(&self) -> impl Iterator<Item = (usize, &str, i32)> + '_ {
        self.standings.iter().enumerate().map(|(i, &idx)| {
            let player = &self.players[idx];
            (i + 1, player.name.as_str(), player.score)
        })
    }

    /// Events recorded by mutations since startup or the last history load.
    pub fn history(&self) -> &[HistoryEvent] {
        &self.history
    }

    /// Replace the in-memory history log (used by history load).
    pub fn replace_history(&mut self, events: Vec<HistoryEvent>) {
        self.history = events;
    }

    /// Add a player. With no name, a fresh `Player(i)` name is synthesized;
    /// a requested name that collides with an existing one gets the
    /// smallest unused `(i)` suffix. The initial score is clamped into the
    /// score range.
    ///
    /// Returns the stored (possibly suffixed) name. Fails when the registry
    /// is full, when the requested name is longer than [`MAX_NAME_LEN`]
    /// characters, or when it is empty.
    pub fn add_player(
        &mut self,
        name: Option<&str>,
        score: i64,
    ) -> Result<String, ScoreboardError> {
        if self.players.len() >= self.max_players as usize {
            return Err(ScoreboardError::AtCapacity {
                limit: self.max_players,
            });
        }

        let stored = match name {
            Some(requested) => {
                let chars = requested.chars().count();
                if chars == 0 {
                    return Err(ScoreboardError::InvalidName);
                }
                if chars > MAX_NAME_LEN {
                    return Err(ScoreboardError::NameTooLong {
                        name: requested.to_string(),
                    });
                }
                self.disambiguate(requested, None)
            }
            None => self.synthesized_name(),
        };

        let score = clamp_score(score);
        debug!(name = %stored, score, "add player");
        self.insert_record(stored.clone(), score);
        self.resort();
        Ok(stored)
    }

    /// Create up to `count` players with synthesized names and score zero,
    /// never exceeding remaining capacity. Returns how many were created
    /// and whether the request was truncated.
    pub fn init_players(&mut self, count: u32) -> (usize, bool) {
        let available = (self.max_players as usize).saturating_sub(self.players.len());
        let created = (count as usize).min(available);

        for _ in 0..created {
            let name = self.synthesized_name();
            self.insert_record(name, 0);
        }
        self.resort();

        debug!(created, requested = count, "init players");
        (created, count as usize > created)
    }

    /// Remove the selected player. Returns the removed name.
    pub fn remove_player(&mut self, selector: &Selector) -> Result<String, ScoreboardError> {
        let idx = self.resolve(selector)?;
        let player = self.remove_at(idx);
        debug!(name = %player.name, "remove player");
        self.history.push(HistoryEvent::Removed {
            name: player.name.clone(),
            score: player.score,
        });
        self.resort();
        Ok(player.name)
    }

    /// Remove every player unconditionally.
    pub fn remove_all(&mut self) {
        debug!(count = self.players.len(), "remove all players");
        self.players.clear();
        self.by_name.clear();
        self.standings.clear();
        self.history.push(HistoryEvent::Cleared);
    }

    /// Rename the selected player, keeping its score. The new name is
    /// disambiguated against every other player; renaming a player to its
    /// own current name is a no-op rather than a collision.
    ///
    /// Returns the stored (possibly suffixed) new name.
    pub fn rename_player(
        &mut self,
        selector: &Selector,
        new_name: &str,
    ) -> Result<String, ScoreboardError> {
        let chars = new_name.chars().count();
        if chars == 0 || chars > MAX_NAME_LEN {
            return Err(ScoreboardError::InvalidName);
        }

        let idx = self.resolve(selector)?;
        let stored = self.disambiguate(new_name, Some(idx));
        let old = std::mem::replace(&mut self.players[idx].name, stored.clone());
        self.by_name.remove(&old);
        self.by_name.insert(stored.clone(), idx);
        debug!(from = %old, to = %stored, "rename player");
        self.history.push(HistoryEvent::Renamed {
            from: old,
            to: stored.clone(),
        });
        self.resort();
        Ok(stored)
    }

    /// Add `delta` to the selected player's score, saturating at the score
    /// bounds. Clamping is silent; it is not an error. Returns the new
    /// score.
    pub fn adjust_score(
        &mut self,
        selector: &Selector,
        delta: i64,
    ) -> Result<i32, ScoreboardError> {
        let idx = self.resolve(selector)?;
        let old = self.players[idx].score;
        Ok(self.write_score(idx, clamp_score((old as i64).saturating_add(delta))))
    }

    /// Set the selected player's score, clamped into the score range.
    /// Returns the stored score.
    pub fn set_score(&mut self, selector: &Selector, value: i64) -> Result<i32, ScoreboardError> {
        let idx = self.resolve(selector)?;
        Ok(self.write_score(idx, clamp_score(value)))
    }

    /// Reset the selected player's score to zero.
    pub fn reset_score(&mut self, selector: &Selector) -> Result<(), ScoreboardError> {
        self.set_score(selector, 0).map(|_| ())
    }

    /// Reset every player's score to zero.
    pub fn reset_all_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
        self.history.push(HistoryEvent::ResetAll);
        self.resort();
    }

    /// Set the player limit, hard-capped at [`HARD_MAX_PLAYERS`]. When the
    /// new limit is below the current player count, the lowest-ranked
    /// players are evicted until the registry fits. Returns how many were
    /// evicted.
    pub fn set_max_players(&mut self, limit: i64) -> Result<usize, ScoreboardError> {
        if limit < 0 || limit > HARD_MAX_PLAYERS as i64 {
            return Err(ScoreboardError::OutOfRange { value: limit });
        }
        let limit = limit as u32;

        let mut evicted = 0;
        while self.players.len() > limit as usize {
            // bottom of the standings goes first
            let Some(&idx) = self.standings.last() else {
                break;
            };
            let player = self.remove_at(idx);
            self.history.push(HistoryEvent::Removed {
                name: player.name,
                score: player.score,
            });
            self.resort();
            evicted += 1;
        }

        debug!(limit, evicted, "set player limit");
        self.max_players = limit;
        Ok(evicted)
    }

    /// Set the display cap. Validated to the same range as the player
    /// limit; has no effect on the registry itself.
    pub fn set_show_max(&mut self, limit: i64) -> Result<(), ScoreboardError> {
        if limit < 0 || limit > HARD_MAX_PLAYERS as i64 {
            return Err(ScoreboardError::OutOfRange { value: limit });
        }
        self.show_max = Some(limit as u32);
        Ok(())
    }

    /// Replace the registry and limits from a saved document. Every record
    /// is validated (limits in range, names non-empty and under the hard
    /// cap, collisions suffixed, scores clamped, capacity respected); on
    /// any error the scoreboard is left untouched. The history log is not
    /// part of the registry and survives a load.
    ///
    /// Returns the number of players loaded.
    pub fn restore(
        &mut self,
        max_players: i64,
        show_max: Option<i64>,
        records: Vec<Player>,
    ) -> Result<usize, ScoreboardError> {
        if max_players < 0 || max_players > HARD_MAX_PLAYERS as i64 {
            return Err(ScoreboardError::OutOfRange { value: max_players });
        }
        if let Some(cap) = show_max {
            if cap < 0 || cap > HARD_MAX_PLAYERS as i64 {
                return Err(ScoreboardError::OutOfRange { value: cap });
            }
        }

        let mut staged = Scoreboard::new();
        staged.max_players = max_players as u32;
        staged.show_max = show_max.map(|cap| cap as u32);

        for record in records {
            if staged.players.len() >= staged.max_players as usize {
                return Err(ScoreboardError::AtCapacity {
                    limit: staged.max_players,
                });
            }
            let chars = record.name.chars().count();
            if chars == 0 {
                return Err(ScoreboardError::InvalidName);
            }
            if chars > NAME_HARD_CAP {
                return Err(ScoreboardError::NameTooLong { name: record.name });
            }
            let stored = staged.disambiguate(&record.name, None);
            staged.insert_record(stored, clamp_score(record.score as i64));
        }
        staged.resort();

        let loaded = staged.players.len();
        debug!(loaded, "restore registry");
        self.players = staged.players;
        self.by_name = staged.by_name;
        self.standings = staged.standings;
        self.max_players = staged.max_players;
        self.show_max = staged.show_max;
        Ok(loaded)
    }

    /// Map a selector to an arena slot against the current standings.
    fn resolve(&self, selector: &Selector) -> Result<usize, ScoreboardError> {
        match selector {
            Selector::Rank(rank) => {
                let size = self.players.len();
                if *rank < 1 || *rank > size as u64 {
                    return Err(ScoreboardError::InvalidRank { rank: *rank, size });
                }
                Ok(self.standings[(*rank - 1) as usize])
            }
            Selector::Name(name) => match self.by_name.get(name) {
                Some(&idx) => Ok(idx),
                None => Err(ScoreboardError::NotFound { name: name.clone() }),
            },
        }
    }

    /// Smallest-suffix unique form of a requested name. `exclude` names an
    /// arena slot whose current name does not count as a collision (the
    /// player being renamed).
    fn disambiguate(&self, requested: &str, exclude: Option<usize>) -> String {
        if self.name_is_free(requested, exclude) {
            return requested.to_string();
        }
        let mut i: u32 = 1;
        loop {
            let candidate = format!("{}({})", requested, i);
            if self.name_is_free(&candidate, exclude) {
                return candidate;
            }
            i += 1;
        }
    }

    /// `Player(i)` with the smallest positive `i` not in use.
    fn synthesized_name(&self) -> String {
        let mut i: u32 = 1;
        loop {
            let candidate = format!("Player({})", i);
            if !self.by_name.contains_key(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    fn name_is_free(&self, name: &str, exclude: Option<usize>) -> bool {
        match self.by_name.get(name) {
            None => true,
            Some(&idx) => exclude == Some(idx),
        }
    }

    fn insert_record(&mut self, name: String, score: i32) {
        self.by_name.insert(name.clone(), self.players.len());
        self.history.push(HistoryEvent::Added {
            name: name.clone(),
            score,
        });
        self.players.push(Player { name, score });
    }

    /// Take a player out of the arena, keeping the lookup table in sync.
    /// The standings are stale until the caller resorts.
    fn remove_at(&mut self, idx: usize) -> Player {
        let player = self.players.swap_remove(idx);
        self.by_name.remove(&player.name);
        if idx < self.players.len() {
            let moved = self.players[idx].name.clone();
            self.by_name.insert(moved, idx);
        }
        player
    }

    fn write_score(&mut self, idx: usize, new: i32) -> i32 {
        let old = self.players[idx].score;
        self.players[idx].score = new;
        self.history.push(HistoryEvent::ScoreChanged {
            name: self.players[idx].name.clone(),
            from: old,
            to: new,
        });
        self.resort();
        new
    }

    /// Rebuild the standings: descending score, ascending name on ties.
    fn resort(&mut self) {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by(|&a, &b| {
            let pa = &self.players[a];
            let pb = &self.players[b];
            pb.score.cmp(&pa.score).then_with(|| pa.name.cmp(&pb.name))
        });
        self.standings = order;
    }
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;

#[cfg(test)]
#[path = "ranking_props.rs"]
mod ranking_props;
