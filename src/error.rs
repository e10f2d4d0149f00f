//! Error types for game setup and state persistence.
//!
//! Scoring transitions themselves never fail: a call without a live game
//! returns `None` and a duplicate submission returns the unchanged snapshot.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur when starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// None of the requested player ids exist in the directory.
    #[error("no requested player could be found in the directory")]
    NoPlayers,
}

/// Errors that can occur when saving or restoring a persisted state blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// The state could not be serialized.
    #[error("failed to encode state: {0}")]
    Encode(String),
    /// The blob is not valid JSON or does not match the expected shape.
    #[error("failed to decode state: {0}")]
    Decode(String),
    /// The blob was written by a different engine.
    #[error("state blob belongs to `{found}`, expected `{expected}`")]
    NameMismatch {
        /// Name recorded in the blob.
        found: String,
        /// Name this engine writes.
        expected: &'static str,
    },
    /// The blob was written with an incompatible schema version.
    #[error("state blob version {found} is not supported (expected {expected})")]
    VersionMismatch {
        /// Version recorded in the blob.
        found: u32,
        /// Version this engine writes.
        expected: u32,
    },
}
