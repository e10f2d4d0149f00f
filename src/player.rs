//! Player identity, lifetime statistics, and the directory the engines read
//! from at game start and merge into at game end.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Unique player identifier.
pub type PlayerId = u32;

/// A player with lifetime statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Number of finished games.
    pub games: u32,
    /// Lifetime points per dart.
    pub average: f64,
    /// Lifetime darts thrown.
    pub total_darts_thrown: u64,
    /// Lifetime points scored.
    pub total_points_scored: u64,
    /// Weighted hit counts keyed by dart notation (`"T20"`, `"D16"`, `"20"`).
    #[serde(default)]
    pub dart_hits: BTreeMap<String, f64>,
}

impl Player {
    /// Creates a player with empty statistics.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            games: 0,
            average: 0.0,
            total_darts_thrown: 0,
            total_points_scored: 0,
            dart_hits: BTreeMap::new(),
        }
    }

    /// Returns up to `count` notations ordered by hit weight, heaviest first.
    ///
    /// Ties are broken alphabetically so the result is stable.
    #[must_use]
    pub fn favorite_darts(&self, count: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .dart_hits
            .iter()
            .map(|(notation, weight)| (notation.clone(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(count);
        ranked
    }
}

/// Lookup and write-back contract for persistent players.
pub trait PlayerDirectory {
    /// Returns a copy of the player with the given id.
    fn find_by_id(&self, id: PlayerId) -> Option<Player>;

    /// Inserts or replaces each player by id.
    fn upsert_many(&mut self, players: Vec<Player>);
}

/// In-memory player directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    /// Players by id.
    players: HashMap<PlayerId, Player>,
    /// Ids in insertion order.
    order: Vec<PlayerId>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a player.
    pub fn insert(&mut self, player: Player) {
        if !self.players.contains_key(&player.id) {
            self.order.push(player.id);
        }
        self.players.insert(player.id, player);
    }

    /// Returns the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns all players in insertion order.
    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        self.order
            .iter()
            .filter_map(|id| self.players.get(id))
            .cloned()
            .collect()
    }
}

impl FromIterator<Player> for MemoryDirectory {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut directory = Self::new();
        for player in iter {
            directory.insert(player);
        }
        directory
    }
}

impl PlayerDirectory for MemoryDirectory {
    fn find_by_id(&self, id: PlayerId) -> Option<Player> {
        self.players.get(&id).cloned()
    }

    fn upsert_many(&mut self, players: Vec<Player>) {
        for player in players {
            self.insert(player);
        }
    }
}
