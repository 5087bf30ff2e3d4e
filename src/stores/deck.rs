use chrono::Utc;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::core::deck::{DeckTracker, DecisionLogPolicy, SwipeError};
use crate::models::{DeckView, Grant, SwipeDecision, Verdict};
use crate::services::storage::{write_json, LocalStore, StorageError, StorageKey};
use crate::stores::{load_or_default, lock};

/// Errors that can occur when recording a swipe
#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Swipe(#[from] SwipeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Persisted deck, decision log and shortlist
pub struct DeckStore {
    store: Arc<dyn LocalStore>,
    state: Mutex<DeckTracker>,
    policy: DecisionLogPolicy,
}

impl DeckStore {
    /// Rehydrate from durable state; unreadable state starts empty
    pub fn load(store: Arc<dyn LocalStore>, policy: DecisionLogPolicy) -> Self {
        let tracker: DeckTracker = load_or_default(store.as_ref(), StorageKey::DECK);
        let tracker = tracker.normalized();

        tracing::debug!(
            "Deck rehydrated: {} grants, cursor {}, {} shortlisted",
            tracker.grants().len(),
            tracker.current_index(),
            tracker.shortlist().len()
        );

        Self {
            store,
            state: Mutex::new(tracker),
            policy,
        }
    }

    /// Apply a mutation and persist the result under the same lock
    fn mutate<R>(&self, f: impl FnOnce(&mut DeckTracker) -> R) -> Result<R, StorageError> {
        let mut tracker = lock(&self.state);
        let result = f(&mut tracker);
        write_json(self.store.as_ref(), StorageKey::DECK, &*tracker)?;
        Ok(result)
    }

    pub fn snapshot(&self) -> DeckTracker {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> DeckView {
        view_of(&lock(&self.state))
    }

    pub fn find(&self, grant_id: &str) -> Option<Grant> {
        lock(&self.state).find(grant_id).cloned()
    }

    pub fn shortlist_ids(&self) -> Vec<String> {
        lock(&self.state).shortlist().to_vec()
    }

    pub fn is_shortlisted(&self, grant_id: &str) -> bool {
        lock(&self.state).is_shortlisted(grant_id)
    }

    pub fn decisions(&self) -> Vec<SwipeDecision> {
        lock(&self.state).decisions().to_vec()
    }

    pub fn set_candidates(&self, grants: Vec<Grant>) -> Result<DeckView, StorageError> {
        tracing::info!("Deck seeded with {} grants", grants.len());
        self.mutate(|tracker| {
            tracker.set_candidates(grants);
            view_of(tracker)
        })
    }

    pub fn record_decision(&self, grant_id: &str, verdict: Verdict) -> Result<(), StorageError> {
        let policy = self.policy;
        self.mutate(|tracker| tracker.record_decision(grant_id, verdict, Utc::now(), policy))
    }

    pub fn advance(&self) -> Result<DeckView, StorageError> {
        self.mutate(|tracker| {
            tracker.advance();
            view_of(tracker)
        })
    }

    /// Returns whether the id was newly added
    pub fn shortlist_add(&self, grant_id: &str) -> Result<bool, StorageError> {
        self.mutate(|tracker| tracker.shortlist_add(grant_id))
    }

    /// Returns whether the id was present
    pub fn shortlist_remove(&self, grant_id: &str) -> Result<bool, StorageError> {
        self.mutate(|tracker| tracker.shortlist_remove(grant_id))
    }

    /// Decision, shortlist and cursor in one transition and one write
    ///
    /// The cursor check happens under the same lock as the update; a
    /// rejected swipe writes nothing.
    pub fn record_swipe(&self, grant_id: &str, verdict: Verdict) -> Result<DeckView, DeckError> {
        let view = {
            let mut tracker = lock(&self.state);
            tracker.record_swipe(grant_id, verdict, Utc::now(), self.policy)?;
            write_json(self.store.as_ref(), StorageKey::DECK, &*tracker)?;
            view_of(&tracker)
        };

        tracing::debug!("Swipe recorded: {} -> {:?}", grant_id, verdict);
        Ok(view)
    }

    pub fn reset(&self) -> Result<(), StorageError> {
        tracing::info!("Deck reset");
        self.mutate(DeckTracker::reset)
    }
}

fn view_of(tracker: &DeckTracker) -> DeckView {
    DeckView {
        status: tracker.status(),
        current_index: tracker.current_index(),
        total: tracker.grants().len(),
        current: tracker.current().cloned(),
        shortlist_count: tracker.shortlist().len(),
    }
}
