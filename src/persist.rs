//! Versioned state blobs for cross-session resume.
//!
//! Each engine writes its state as a JSON envelope
//! `{ "name": ..., "version": ..., "data": ... }`. A blob whose name or
//! version does not match is rejected as a whole.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PersistError;

/// Key-value storage for state blobs.
pub trait StateStore {
    /// Returns the blob stored under `key`.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, blob: String);
}

/// In-memory [`StateStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the blob stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, blob: String) {
        self.entries.insert(key.to_string(), blob);
    }
}

/// A state shape that can be written to and read from a [`StateStore`].
pub trait Persisted: Serialize + DeserializeOwned {
    /// Storage key and envelope name.
    const NAME: &'static str;
    /// Schema version. Bump on any incompatible shape change.
    const VERSION: u32;

    /// Encodes `self` inside a versioned envelope.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] if serialization fails.
    fn to_blob(&self) -> Result<String, PersistError> {
        let envelope = Envelope {
            name: Self::NAME.to_string(),
            version: Self::VERSION,
            data: self,
        };
        serde_json::to_string(&envelope).map_err(|e| PersistError::Encode(e.to_string()))
    }

    /// Decodes a blob, checking the envelope before touching the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is malformed, was written by another
    /// engine, or carries a different schema version.
    fn from_blob(blob: &str) -> Result<Self, PersistError> {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(blob).map_err(|e| PersistError::Decode(e.to_string()))?;

        if envelope.name != Self::NAME {
            return Err(PersistError::NameMismatch {
                found: envelope.name,
                expected: Self::NAME,
            });
        }
        if envelope.version != Self::VERSION {
            return Err(PersistError::VersionMismatch {
                found: envelope.version,
                expected: Self::VERSION,
            });
        }

        serde_json::from_value(envelope.data).map_err(|e| PersistError::Decode(e.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    name: String,
    version: u32,
    data: T,
}

/// Loads and decodes the blob for `T`, if one is stored.
///
/// # Errors
///
/// Returns an error if a blob exists but cannot be decoded.
pub fn load<T: Persisted>(store: &impl StateStore) -> Result<Option<T>, PersistError> {
    store.load(T::NAME).map(|blob| T::from_blob(&blob)).transpose()
}

/// Encodes and stores `value`.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
pub fn save<T: Persisted>(store: &mut impl StateStore, value: &T) -> Result<(), PersistError> {
    let blob = value.to_blob()?;
    store.save(T::NAME, blob);
    Ok(())
}
