//! X01 scoring engine.
//!
//! The engine owns a single session lock. Every transition clones the live
//! [`X01GameState`], reduces it with one of the pure functions in this module,
//! and replaces the snapshot wholesale.

use core::time::Duration;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{PersistError, StartError};
use crate::options::X01Options;
use crate::persist::{self, Persisted, StateStore};
use crate::player::{Player, PlayerDirectory, PlayerId};
use crate::sync::Mutex;

mod leg;
pub mod state;
mod turn;
mod undo;

pub use leg::{complete_leg, leg_opener, legs_to_win, merge_lifetime_stats};
pub use state::{TurnEntry, TurnOutcome, X01GameState, X01Player};
pub use turn::{DOUBLE, Throw, apply_throw, classify};
pub use undo::{dart_share, undo_last};

/// Persisted X01 session: settings, the live match, and the darts of the
/// most recent submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X01SavedState {
    /// Settings for the next (or current) match.
    pub settings: X01Options,
    /// The live match, if any.
    pub current_game: Option<X01GameState>,
    /// Notations submitted with the most recent turn.
    #[serde(default)]
    pub recent_notations: Vec<String>,
}

impl Persisted for X01SavedState {
    const NAME: &'static str = "dartscore.x01";
    const VERSION: u32 = 1;
}

struct Session {
    options: X01Options,
    game: Option<X01GameState>,
    last_submission: Option<Duration>,
    recent_notations: Vec<String>,
}

/// An X01 scoring engine running at most one match at a time.
///
/// # Example
///
/// ```
/// use dartscore::{MemoryDirectory, Player, Throw, X01Engine, X01Options};
///
/// let directory: MemoryDirectory =
///     [Player::new(1, "Ada"), Player::new(2, "Bo")].into_iter().collect();
/// let engine = X01Engine::new(X01Options::default().with_debounce_ms(0));
/// engine.start_game(&directory, &[1, 2], 0).unwrap();
///
/// let state = engine.record_score(Throw::new(60, 3)).unwrap();
/// assert_eq!(state.players[0].score, 441);
/// assert_eq!(state.current_player_index, 1);
/// ```
pub struct X01Engine {
    session: Mutex<Session>,
    #[cfg(feature = "std")]
    clock: std::time::Instant,
}

impl X01Engine {
    /// Creates an engine with no live match.
    #[must_use]
    pub fn new(options: X01Options) -> Self {
        Self {
            session: Mutex::new(Session {
                options,
                game: None,
                last_submission: None,
                recent_notations: Vec::new(),
            }),
            #[cfg(feature = "std")]
            clock: std::time::Instant::now(),
        }
    }

    /// Returns the settings used for the next match.
    pub fn options(&self) -> X01Options {
        self.session.lock().options.clone()
    }

    /// Replaces the settings. A live match keeps the rules it started with.
    pub fn set_options(&self, options: X01Options) {
        self.session.lock().options = options;
    }

    /// Returns a snapshot of the live match.
    pub fn game(&self) -> Option<X01GameState> {
        self.session.lock().game.clone()
    }

    /// Returns the notations submitted with the most recent turn.
    pub fn recent_notations(&self) -> Vec<String> {
        self.session.lock().recent_notations.clone()
    }

    /// Starts a match for the given players in rotation order.
    ///
    /// Ids missing from the directory are skipped. `starting_player_index`
    /// picks who opens the first leg and wraps around the resolved players.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::NoPlayers`] if no id resolves; the engine keeps
    /// its previous state.
    pub fn start_game(
        &self,
        directory: &impl PlayerDirectory,
        player_ids: &[PlayerId],
        starting_player_index: usize,
    ) -> Result<X01GameState, StartError> {
        let mut session = self.session.lock();
        let options = session.options.clone();
        let initial_score = options.game_type.starting_score();

        let players: Vec<X01Player> = player_ids
            .iter()
            .filter_map(|&id| {
                let found = directory.find_by_id(id);
                if found.is_none() {
                    tracing::warn!(player_id = id, "player not found in directory, skipping");
                }
                found
            })
            .map(|profile| X01Player::new(profile, initial_score))
            .collect();

        if players.is_empty() {
            return Err(StartError::NoPlayers);
        }

        let starting_player_index = starting_player_index % players.len();
        let state = X01GameState {
            game_type: options.game_type,
            legs_won: leg::empty_legs_table(players.iter().map(X01Player::id)),
            current_player_index: starting_player_index,
            starting_player_index,
            is_double_out: options.double_out,
            is_double_in: options.double_in,
            input_mode: options.input_mode,
            is_game_finished: false,
            total_legs: options.total_legs,
            current_leg: 1,
            last_outcome: None,
            players,
        };

        tracing::info!(
            players = state.players.len(),
            game_type = initial_score,
            legs = state.total_legs,
            double_in = state.is_double_in,
            double_out = state.is_double_out,
            "x01 match started"
        );

        session.game = Some(state.clone());
        session.last_submission = None;
        session.recent_notations.clear();
        Ok(state)
    }

    /// Records a turn for the current player, timed by the engine's clock.
    ///
    /// See [`record_score_at`](Self::record_score_at).
    #[cfg(feature = "std")]
    pub fn record_score(&self, throw: Throw<'_>) -> Option<X01GameState> {
        self.record_score_at(self.clock.elapsed(), throw)
    }

    /// Records a turn for the current player at time `now`.
    ///
    /// A submission arriving within the debounce window of the previous
    /// accepted one is discarded and the unchanged snapshot returned. A
    /// checkout commits the turn first and then completes the leg as a
    /// second transition. Returns `None` when no match is live.
    pub fn record_score_at(&self, now: Duration, throw: Throw<'_>) -> Option<X01GameState> {
        let mut session = self.session.lock();
        let current = session.game.as_ref()?;

        let window = Duration::from_millis(session.options.debounce_ms);
        if let Some(previous) = session.last_submission {
            if now.saturating_sub(previous) < window {
                tracing::trace!(score = throw.score, "duplicate submission ignored");
                return Some(current.clone());
            }
        }

        let (committed, outcome) = apply_throw(current, &throw);
        let Some(outcome) = outcome else {
            return Some(committed);
        };
        let player_id = current.players[current.current_player_index].id();

        tracing::debug!(
            player_id,
            score = throw.score,
            darts = throw.darts,
            ?outcome,
            "x01 turn resolved"
        );

        session.last_submission = Some(now);
        session.recent_notations = throw.notations.iter().map(ToString::to_string).collect();
        session.game = Some(committed);

        if outcome == TurnOutcome::Checkout {
            let finished = session
                .game
                .as_ref()
                .map(|game| complete_leg(game, player_id))?;
            log_leg_result(&finished, player_id);
            session.game = Some(finished);
        }

        session.game.clone()
    }

    /// Reverts the most recent submission and hands the turn back.
    ///
    /// Returns `None` when no match is live.
    pub fn undo_last_score(&self) -> Option<X01GameState> {
        let mut session = self.session.lock();
        let reverted = undo_last(session.game.as_ref()?);
        tracing::debug!(
            player_index = reverted.current_player_index,
            "x01 turn undone"
        );
        session.game = Some(reverted);
        session.game.clone()
    }

    /// Credits a leg to `winner_id`, finishing the match or starting the
    /// next leg.
    ///
    /// Returns `None` when no match is live.
    pub fn handle_leg_win(&self, winner_id: PlayerId) -> Option<X01GameState> {
        let mut session = self.session.lock();
        let next = complete_leg(session.game.as_ref()?, winner_id);
        log_leg_result(&next, winner_id);
        session.game = Some(next);
        session.game.clone()
    }

    /// Ends the match, merges every player's totals into the directory, and
    /// clears the live state.
    ///
    /// Returns the merged lifetime records, or `None` when no match is live.
    pub fn end_game(&self, directory: &mut impl PlayerDirectory) -> Option<Vec<Player>> {
        let mut session = self.session.lock();
        let game = session.game.take()?;
        session.last_submission = None;
        drop(session);

        let merged = merge_lifetime_stats(&game, |id| directory.find_by_id(id));
        directory.upsert_many(merged.clone());
        tracing::info!(
            players = merged.len(),
            finished = game.is_game_finished,
            "x01 match ended"
        );
        Some(merged)
    }

    /// Writes settings, the live match, and the recent notations to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded.
    pub fn save(&self, store: &mut impl StateStore) -> Result<(), PersistError> {
        let saved = {
            let session = self.session.lock();
            X01SavedState {
                settings: session.options.clone(),
                current_game: session.game.clone(),
                recent_notations: session.recent_notations.clone(),
            }
        };
        persist::save(store, &saved)
    }

    /// Restores a session written by [`save`](Self::save).
    ///
    /// Returns `Ok(false)` if the store holds no X01 blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is malformed or was written with another
    /// schema version; the engine is left untouched.
    pub fn restore(&self, store: &impl StateStore) -> Result<bool, PersistError> {
        let saved = match persist::load::<X01SavedState>(store) {
            Ok(Some(saved)) => saved,
            Ok(None) => return Ok(false),
            Err(e) => {
                tracing::warn!(error = %e, "discarding persisted x01 state");
                return Err(e);
            }
        };

        let mut session = self.session.lock();
        session.options = saved.settings;
        session.game = saved.current_game;
        session.recent_notations = saved.recent_notations;
        session.last_submission = None;
        Ok(true)
    }
}

impl Default for X01Engine {
    fn default() -> Self {
        Self::new(X01Options::default())
    }
}

fn log_leg_result(state: &X01GameState, winner_id: PlayerId) {
    if state.is_game_finished {
        tracing::info!(
            winner_id,
            legs = state.legs_won_by(winner_id),
            "x01 match finished"
        );
    } else {
        tracing::info!(winner_id, next_leg = state.current_leg, "x01 leg won");
    }
}
