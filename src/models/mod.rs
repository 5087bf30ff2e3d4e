// Model exports
pub mod account;
pub mod domain;
pub mod requests;
pub mod responses;

pub use account::{Account, AccountWithPreferences, CreateAccountRequest, Preferences, SavePreferencesRequest};
pub use domain::{
    Draft, FundingNeed, Grant, OnboardingStep, Profile, ProfileUpdate, ScoredGrant, ScoringWeights,
    SubmissionReceipt, SwipeDecision, TeamSize, Verdict,
};
pub use requests::{SaveDraftRequest, SubmitRequest, SuggestRequest, SuggestionKind, SwipeRequest};
pub use responses::{DeckView, ErrorResponse, HealthResponse, MatchResponse, SubmitResponse};
