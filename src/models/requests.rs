use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Verdict;

/// Request to record a swipe on the current deck
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "grant_id", rename = "grantId")]
    pub grant_id: String,
    #[serde(alias = "verdict", rename = "decision")]
    pub decision: Verdict,
}

/// Draft content coming from the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDraftRequest {
    pub content: String,
}

/// Rewrite suggestion kinds offered by the draft assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Clarity,
    Shorten,
    Formal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub kind: SuggestionKind,
}

/// Submission body; falls back to the saved draft when `content` is absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub content: Option<String>,
}
