// Core algorithm exports
pub mod deck;
pub mod drafts;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use deck::{DeckStatus, DeckTracker, DecisionLogPolicy, SwipeError};
pub use drafts::{apply_suggestion, generate_draft};
pub use filters::{any_tag_contains, matched_needs, matches_industry};
pub use matcher::{Matcher, MatchResult};
pub use scoring::{calculate_match_score, ScoreBreakdown};
