//! X01 game state types.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::options::{GameType, InputMode};
use crate::player::{Player, PlayerId};

/// One submitted turn in a player's leg history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    /// Points counted for the turn (0 for a bust or missed double-in).
    pub score: u32,
    /// Darts thrown in the turn.
    pub darts: u32,
}

/// How a submission was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Points were subtracted from the player's score.
    Scored,
    /// The turn broke the checkout rules and counted nothing.
    Bust,
    /// The player has not doubled in yet and the last dart was not a double.
    DoubleInMissed,
    /// The player reached exactly zero and won the leg.
    Checkout,
}

/// A player's state within an X01 match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01Player {
    /// Directory record at game start.
    pub profile: Player,
    /// Remaining score in the current leg.
    pub score: u32,
    /// Score at the start of every leg.
    pub initial_score: u32,
    /// Darts thrown in the current leg.
    pub darts_thrown: u32,
    /// Turns of the current leg, oldest first.
    pub scores: Vec<TurnEntry>,
    /// Turns scoring 100-139 this leg.
    pub rounds_100_plus: u32,
    /// Turns scoring 140-179 this leg.
    pub rounds_140_plus: u32,
    /// Turns scoring exactly 180 this leg.
    pub rounds_180: u32,
    /// Points per dart this leg.
    pub avg_per_dart: f64,
    /// Points per three-dart round this leg.
    pub avg_per_round: f64,
    /// Points counted for the most recent turn.
    pub last_round_score: u32,
    /// Darts thrown across every leg of the match.
    pub match_darts_thrown: u64,
    /// Points scored across every leg of the match.
    pub match_points_scored: u64,
    /// Weighted dart hits recorded during this game.
    #[serde(default)]
    pub dart_hits: BTreeMap<String, f64>,
}

impl X01Player {
    pub(crate) fn new(profile: Player, initial_score: u32) -> Self {
        Self {
            profile,
            score: initial_score,
            initial_score,
            darts_thrown: 0,
            scores: Vec::new(),
            rounds_100_plus: 0,
            rounds_140_plus: 0,
            rounds_180: 0,
            avg_per_dart: 0.0,
            avg_per_round: 0.0,
            last_round_score: 0,
            match_darts_thrown: 0,
            match_points_scored: 0,
            dart_hits: BTreeMap::new(),
        }
    }

    /// Player id.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.profile.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

/// Snapshot of a live X01 match.
///
/// `players` keeps the selection order for the whole match; the rotation
/// slot of a player is its index plus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01GameState {
    /// Starting score variant.
    pub game_type: GameType,
    /// Players in rotation order.
    pub players: Vec<X01Player>,
    /// Index of the player to throw next.
    pub current_player_index: usize,
    /// Index of the player who opened the first leg.
    pub starting_player_index: usize,
    /// Whether legs must be finished on a double.
    pub is_double_out: bool,
    /// Whether legs must be started on a double.
    pub is_double_in: bool,
    /// Undo granularity.
    pub input_mode: InputMode,
    /// Whether the match is over.
    pub is_game_finished: bool,
    /// Number of legs in the match.
    pub total_legs: u32,
    /// Current leg, starting at 1.
    pub current_leg: u32,
    /// Legs won per player.
    pub legs_won: BTreeMap<PlayerId, u32>,
    /// Resolution of the most recent submission.
    #[serde(default)]
    pub last_outcome: Option<TurnOutcome>,
}

impl X01GameState {
    /// Returns the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&X01Player> {
        self.players.get(self.current_player_index)
    }

    /// Returns the player with the given id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&X01Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Returns the 1-based rotation slot of a player.
    #[must_use]
    pub fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id).map(|i| i + 1)
    }

    /// Returns every player's 1-based rotation slot.
    #[must_use]
    pub fn player_positions(&self) -> BTreeMap<PlayerId, usize> {
        self.players
            .iter()
            .enumerate()
            .map(|(index, p)| (p.id(), index + 1))
            .collect()
    }

    /// Legs won by a player.
    #[must_use]
    pub fn legs_won_by(&self, id: PlayerId) -> u32 {
        self.legs_won.get(&id).copied().unwrap_or(0)
    }

    /// Returns the match winner, once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_game_finished {
            return None;
        }
        self.players
            .iter()
            .map(X01Player::id)
            .find(|id| self.legs_won_by(*id) > self.total_legs / 2)
    }

    /// Returns a copy of the players ranked by legs won, then by remaining
    /// score. The rotation order in `players` is left untouched.
    #[must_use]
    pub fn standings(&self) -> Vec<X01Player> {
        let mut ranked = self.players.clone();
        ranked.sort_by(|a, b| {
            self.legs_won_by(b.id())
                .cmp(&self.legs_won_by(a.id()))
                .then(a.score.cmp(&b.score))
        });
        ranked
    }
}
