//! Bounded, recency-ordered scan history and its persistence.

use algoguard_core::Profile;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Storage key holding the serialized history array.
pub const HISTORY_KEY: &str = "algoguard.history";

/// Maximum number of profiles retained.
pub const HISTORY_LIMIT: usize = 5;

/// Front-inserts `profile`, dropping any older entry with the same handle and
/// anything beyond [`HISTORY_LIMIT`].
pub fn record(history: &mut Vec<Profile>, profile: Profile) {
    history.retain(|existing| existing.handle != profile.handle);
    history.insert(0, profile);
    history.truncate(HISTORY_LIMIT);
}

/// Reads history from `store`.
///
/// Missing, unreadable, or corrupt data yields an empty list with a warning;
/// a broken history file must never prevent a scan. Loaded entries are
/// re-checked for uniqueness and length.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Profile> {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read scan history; starting empty");
            return Vec::new();
        }
    };

    let stored: Vec<Profile> = match serde_json::from_str(&raw) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(error = %e, "scan history is corrupt; starting empty");
            return Vec::new();
        }
    };

    // Replay oldest-first so the newest copy of a duplicated handle wins.
    let mut history = Vec::with_capacity(HISTORY_LIMIT);
    for profile in stored.into_iter().rev() {
        record(&mut history, profile);
    }
    history
}

/// Rewrites the whole history entry.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or the underlying write fails.
pub fn save<S: KeyValueStore + ?Sized>(store: &S, history: &[Profile]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &raw)
}
