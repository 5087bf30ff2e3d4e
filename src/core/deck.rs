use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Grant, SwipeDecision, Verdict};

/// A swipe that does not target the card under the cursor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwipeError {
    #[error("There is no grant under the cursor")]
    NotActive,

    #[error("Expected a swipe on {expected}, got {got}")]
    NotCurrent { expected: String, got: String },
}

/// Where the user is in the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "lowercase")]
pub enum DeckStatus {
    /// No candidate list has been set since start or the last reset
    Loading,
    Active(usize),
    Exhausted,
}

/// How the decision log treats repeat swipes on the same grant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionLogPolicy {
    /// Every swipe is appended, including re-swipes after a new match cycle
    #[default]
    Append,
    /// A new decision replaces any earlier one for the same grant
    LatestPerCandidate,
}

/// Deck and decision tracker
///
/// Holds the ordered candidate list, a forward-only cursor, the decision
/// log and the shortlist. Serializes with the field names the front end
/// persisted (`grants`, `currentIndex`, `decisions`, `shortlistIds`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckTracker {
    #[serde(default)]
    grants: Vec<Grant>,
    #[serde(default)]
    current_index: usize,
    #[serde(default)]
    decisions: Vec<SwipeDecision>,
    #[serde(default)]
    shortlist_ids: Vec<String>,
    /// Set once a candidate list has been supplied
    #[serde(default)]
    loaded: bool,
}

impl DeckTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> DeckStatus {
        if !self.loaded {
            DeckStatus::Loading
        } else if self.current_index >= self.grants.len() {
            DeckStatus::Exhausted
        } else {
            DeckStatus::Active(self.current_index)
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.status() == DeckStatus::Exhausted
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn decisions(&self) -> &[SwipeDecision] {
        &self.decisions
    }

    pub fn shortlist(&self) -> &[String] {
        &self.shortlist_ids
    }

    pub fn is_shortlisted(&self, grant_id: &str) -> bool {
        self.shortlist_ids.iter().any(|id| id == grant_id)
    }

    /// Grant under the cursor, if the deck is active
    pub fn current(&self) -> Option<&Grant> {
        match self.status() {
            DeckStatus::Active(index) => self.grants.get(index),
            _ => None,
        }
    }

    pub fn find(&self, grant_id: &str) -> Option<&Grant> {
        self.grants.iter().find(|g| g.id == grant_id)
    }

    /// Replace the candidate list and rewind the cursor
    ///
    /// Decisions and shortlist are left alone. An empty list lands
    /// straight in `Exhausted`.
    pub fn set_candidates(&mut self, grants: Vec<Grant>) {
        self.grants = grants;
        self.current_index = 0;
        self.loaded = true;
    }

    /// Append a decision to the log. Does not move the cursor.
    pub fn record_decision(
        &mut self,
        grant_id: &str,
        verdict: Verdict,
        at: DateTime<Utc>,
        policy: DecisionLogPolicy,
    ) {
        if policy == DecisionLogPolicy::LatestPerCandidate {
            self.decisions.retain(|d| d.grant_id != grant_id);
        }

        self.decisions.push(SwipeDecision {
            grant_id: grant_id.to_string(),
            decision: verdict,
            timestamp: at,
        });
    }

    /// Move the cursor forward one card, saturating at the end
    pub fn advance(&mut self) {
        self.current_index = (self.current_index + 1).min(self.grants.len());
    }

    /// Returns false when the id was already present
    pub fn shortlist_add(&mut self, grant_id: &str) -> bool {
        if self.is_shortlisted(grant_id) {
            return false;
        }
        self.shortlist_ids.push(grant_id.to_string());
        true
    }

    /// Returns false when the id was not present
    pub fn shortlist_remove(&mut self, grant_id: &str) -> bool {
        let before = self.shortlist_ids.len();
        self.shortlist_ids.retain(|id| id != grant_id);
        self.shortlist_ids.len() != before
    }

    /// Decision, shortlist and cursor update as one transition
    ///
    /// Only the grant under the cursor can be swiped; anything else leaves
    /// the tracker untouched.
    pub fn record_swipe(
        &mut self,
        grant_id: &str,
        verdict: Verdict,
        at: DateTime<Utc>,
        policy: DecisionLogPolicy,
    ) -> Result<(), SwipeError> {
        match self.current() {
            Some(grant) if grant.id == grant_id => {}
            Some(grant) => {
                return Err(SwipeError::NotCurrent {
                    expected: grant.id.clone(),
                    got: grant_id.to_string(),
                })
            }
            None => return Err(SwipeError::NotActive),
        }

        self.record_decision(grant_id, verdict, at, policy);
        if verdict.is_accept() {
            self.shortlist_add(grant_id);
        }
        self.advance();
        Ok(())
    }

    /// Clear candidates, cursor, decisions and shortlist together
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Repair invariants on a rehydrated snapshot
    ///
    /// Stored data may come from an older build or a hand-edited file:
    /// the cursor is clamped and duplicate shortlist ids collapsed.
    pub fn normalized(mut self) -> Self {
        self.current_index = self.current_index.min(self.grants.len());

        let mut seen = std::collections::HashSet::new();
        self.shortlist_ids.retain(|id| seen.insert(id.clone()));

        // Snapshots written before the loading flag existed
        if !self.grants.is_empty() {
            self.loaded = true;
        }
        self
    }
}
