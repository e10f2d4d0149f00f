//! Scoring engines for X01 and Halve-It darts games, with optional `no_std`
//! support.
//!
//! The crate provides two independent engines, [`X01Engine`] and
//! [`HalveItEngine`]. Each owns at most one live game and replaces its
//! snapshot wholesale on every transition: record a score, pass the turn,
//! undo, finish a leg. Players are read from a [`PlayerDirectory`] when a
//! game starts, and X01 merges lifetime statistics back into it when the
//! game ends. Both engines can save and restore a versioned state blob
//! through a [`StateStore`].
//!
//! # Example
//!
//! ```
//! use dartscore::{MemoryDirectory, Player, Throw, TurnOutcome, X01Engine, X01Options};
//!
//! let directory: MemoryDirectory = [Player::new(1, "Ada")].into_iter().collect();
//! let engine = X01Engine::new(X01Options::default().with_debounce_ms(0));
//! engine.start_game(&directory, &[1], 0).unwrap();
//!
//! let state = engine.record_score(Throw::new(502, 3)).unwrap();
//! assert_eq!(state.last_outcome, Some(TurnOutcome::Bust));
//! assert_eq!(state.players[0].score, 501);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod error;
pub mod halve_it;
pub mod notation;
pub mod options;
pub mod persist;
pub mod player;
mod sync;
pub mod x01;

// Re-export main types
pub use error::{PersistError, StartError};
pub use halve_it::{
    HalveItEngine, HalveItGameState, HalveItMode, HalveItPlayer, HalveItRound, HalveItSavedState,
    LastScore, RoundEntry, RoundInput, RoundTarget, RoundType,
};
pub use notation::{DartNotation, Ring};
pub use options::{GameType, InputMode, X01Options};
pub use persist::{MemoryStore, Persisted, StateStore};
pub use player::{MemoryDirectory, Player, PlayerDirectory, PlayerId};
pub use x01::{Throw, TurnEntry, TurnOutcome, X01Engine, X01GameState, X01Player, X01SavedState};
