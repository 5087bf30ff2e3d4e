//! State-owning services for the persisted records
//!
//! Each store keeps its record in memory behind a mutex and writes the
//! whole snapshot back to the [`LocalStore`] after every mutation. Stores
//! are built once at startup and shared through the application state.

pub mod account;
pub mod deck;
pub mod drafts;
pub mod profile;
pub mod submissions;

pub use account::{AccountError, AccountStore};
pub use deck::{DeckError, DeckStore};
pub use drafts::DraftStore;
pub use profile::{ProfileError, ProfileStore};
pub use submissions::SubmissionLog;

use serde::de::DeserializeOwned;
use std::sync::{Mutex, MutexGuard};

use crate::services::storage::{read_json, LocalStore};

/// Rehydrate a record, falling back to the default on absence or corruption
///
/// A record that fails to decode is logged and removed so the next write
/// starts clean.
pub(crate) fn load_or_default<T>(store: &dyn LocalStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match read_json::<T>(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable record {}: {}", key, e);
            if let Err(e) = store.remove(key) {
                tracing::warn!("Failed to remove record {}: {}", key, e);
            }
            T::default()
        }
    }
}

/// Lock a store's state; a panic in another holder does not wedge the store
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
