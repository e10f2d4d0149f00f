//! Halve-It scoring engine.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{PersistError, StartError};
use crate::persist::{self, Persisted, StateStore};
use crate::player::{PlayerDirectory, PlayerId};
use crate::sync::Mutex;

mod rules;
pub mod state;
mod turn;

pub use rules::{all_rounds_complete, entering_total, recompute_from, score_round};
pub use state::{
    HalveItGameState, HalveItMode, HalveItPlayer, HalveItRound, LastScore, PlayerRound,
    RoundEntry, RoundInput, RoundTarget, RoundType, TARGET_SCORE, template,
};
pub use turn::{finish_turn, record_round, undo_last};

/// Persisted Halve-It session: the template and the players picked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalveItSavedState {
    /// Round template.
    pub mode: HalveItMode,
    /// Selected player ids in seat order.
    pub players: Vec<PlayerId>,
}

impl Persisted for HalveItSavedState {
    const NAME: &'static str = "dartscore.halve_it";
    const VERSION: u32 = 1;
}

#[derive(Default)]
struct Session {
    game: Option<HalveItGameState>,
    mode: HalveItMode,
    selected: Vec<PlayerId>,
}

/// A Halve-It scoring engine running at most one game at a time.
///
/// Recording a score and passing the turn are separate calls, so a caller
/// can show the new total before moving on.
///
/// # Example
///
/// ```
/// use dartscore::{HalveItEngine, HalveItMode, MemoryDirectory, Player, RoundInput};
///
/// let directory: MemoryDirectory = [Player::new(7, "Cy")].into_iter().collect();
/// let engine = HalveItEngine::new();
/// engine.start_game(&directory, HalveItMode::Default, &[7]).unwrap();
///
/// let state = engine.record_round_score(7, 0, RoundInput::points(60)).unwrap();
/// assert_eq!(state.players[0].total_score, 60);
///
/// let state = engine.finish_turn().unwrap();
/// assert_eq!(state.current_round_index, 1);
/// ```
pub struct HalveItEngine {
    session: Mutex<Session>,
}

impl HalveItEngine {
    /// Creates an engine with no live game.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session::default()),
        }
    }

    /// Returns a snapshot of the live game.
    pub fn game(&self) -> Option<HalveItGameState> {
        self.session.lock().game.clone()
    }

    /// Returns the template of the live or most recent game.
    pub fn mode(&self) -> HalveItMode {
        self.session.lock().mode
    }

    /// Returns the ids picked for the live or most recent game.
    pub fn selected_players(&self) -> Vec<PlayerId> {
        self.session.lock().selected.clone()
    }

    /// Starts a game with players seated in `player_ids` order.
    ///
    /// Ids missing from the directory are skipped; seats are numbered over
    /// the players that remain and never change afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::NoPlayers`] if no id resolves; the engine keeps
    /// its previous state.
    pub fn start_game(
        &self,
        directory: &impl PlayerDirectory,
        mode: HalveItMode,
        player_ids: &[PlayerId],
    ) -> Result<HalveItGameState, StartError> {
        let players: Vec<HalveItPlayer> = player_ids
            .iter()
            .filter_map(|&id| {
                let found = directory.find_by_id(id);
                if found.is_none() {
                    tracing::warn!(player_id = id, "player not found in directory, skipping");
                }
                found
            })
            .enumerate()
            .map(|(order_index, profile)| HalveItPlayer {
                id: profile.id,
                name: profile.name,
                total_score: 0,
                rounds: Vec::new(),
                order_index,
            })
            .collect();

        if players.is_empty() {
            return Err(StartError::NoPlayers);
        }

        let state = HalveItGameState {
            mode,
            players,
            current_player_index: 0,
            current_round_index: 0,
            is_game_finished: false,
            rounds: template(mode),
            last_score: None,
        };
        tracing::info!(
            players = state.players.len(),
            rounds = state.rounds.len(),
            ?mode,
            "halve-it game started"
        );

        let mut session = self.session.lock();
        session.mode = mode;
        session.selected = state.players.iter().map(|p| p.id).collect();
        session.game = Some(state.clone());
        Ok(state)
    }

    /// Records a round result for the current player in the current round.
    ///
    /// The engine's own pointers decide who and which round is scored;
    /// `player_id` and `round_index` are only checked against them and a
    /// mismatch is logged. Returns `None` when no game is live.
    pub fn record_round_score(
        &self,
        player_id: PlayerId,
        round_index: usize,
        input: RoundInput,
    ) -> Option<HalveItGameState> {
        let mut session = self.session.lock();
        let current = session.game.as_ref()?;

        let expected_player = current.current_player().map(|p| p.id);
        if expected_player != Some(player_id) || current.current_round_index != round_index {
            tracing::warn!(
                player_id,
                round_index,
                ?expected_player,
                expected_round = current.current_round_index,
                "round score submitted out of turn, scoring the current turn"
            );
        }

        let next = record_round(current, input);
        if let Some(last) = next.last_score {
            tracing::debug!(
                player_id = last.player_id,
                round_index = last.round_index,
                total = next.player(last.player_id).map_or(0, |p| p.total_score),
                finished = next.is_game_finished,
                "halve-it round recorded"
            );
        }
        session.game = Some(next);
        session.game.clone()
    }

    /// Passes the turn on if the current player has scored this round.
    ///
    /// Returns `None` when no game is live.
    pub fn finish_turn(&self) -> Option<HalveItGameState> {
        let mut session = self.session.lock();
        let current = session.game.as_ref()?;
        let next = finish_turn(current);
        if next.is_game_finished && !current.is_game_finished {
            tracing::info!("halve-it game finished");
        }
        session.game = Some(next);
        session.game.clone()
    }

    /// Removes the most recent entry and replays the affected totals.
    ///
    /// Returns `None` when no game is live.
    pub fn undo_last_score(&self) -> Option<HalveItGameState> {
        let mut session = self.session.lock();
        let current = session.game.as_ref()?;
        let undone = current.last_score;
        let next = undo_last(current);
        if let Some(last) = undone {
            tracing::debug!(
                player_id = last.player_id,
                round_index = last.round_index,
                "halve-it round undone"
            );
        }
        session.game = Some(next);
        session.game.clone()
    }

    /// Clears the live game and returns its final snapshot.
    ///
    /// Halve-It results are not written back to the player directory.
    pub fn end_game(&self) -> Option<HalveItGameState> {
        let game = self.session.lock().game.take();
        if game.is_some() {
            tracing::info!("halve-it game ended");
        }
        game
    }

    /// Writes the template and selected players to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded.
    pub fn save(&self, store: &mut impl StateStore) -> Result<(), PersistError> {
        let saved = {
            let session = self.session.lock();
            HalveItSavedState {
                mode: session.mode,
                players: session.selected.clone(),
            }
        };
        persist::save(store, &saved)
    }

    /// Restores the template and selected players written by
    /// [`save`](Self::save). Any live game is left as is.
    ///
    /// Returns `Ok(false)` if the store holds no Halve-It blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is malformed or was written with another
    /// schema version.
    pub fn restore(&self, store: &impl StateStore) -> Result<bool, PersistError> {
        let saved = match persist::load::<HalveItSavedState>(store) {
            Ok(Some(saved)) => saved,
            Ok(None) => return Ok(false),
            Err(e) => {
                tracing::warn!(error = %e, "discarding persisted halve-it state");
                return Err(e);
            }
        };

        let mut session = self.session.lock();
        session.mode = saved.mode;
        session.selected = saved.players;
        Ok(true)
    }
}

impl Default for HalveItEngine {
    fn default() -> Self {
        Self::new()
    }
}
