//! Capital Cupid - grant matching service for the SME funding app
//!
//! Scores a fixed grant catalog against an SME profile, deals the matches
//! as a swipe deck and keeps the resulting shortlist, drafts and account
//! records in a small key-value store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

// Re-export commonly used types
pub use crate::core::{DeckStatus, DeckTracker, DecisionLogPolicy, Matcher};
pub use crate::models::{Grant, MatchResponse, Profile, ScoredGrant, ScoringWeights, Verdict};
pub use crate::routes::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CandidateSource, StaticCatalog};

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::with_default_weights();
        let result = matcher.find_matches(&Profile::default(), StaticCatalog::default().all_candidates());
        assert_eq!(result.total_candidates, 3);
    }
}
