// Route exports
pub mod account;
pub mod deck;
pub mod drafts;
pub mod grants;
pub mod profile;

use actix_web::{http::header, web, HttpResponse};
use std::sync::Arc;

use crate::core::{DecisionLogPolicy, Matcher};
use crate::models::{ErrorResponse, Grant};
use crate::services::{CandidateSource, LocalStore, RegistryClient, RegistryError, StorageError, SubmissionGateway};
use crate::stores::{AccountStore, DeckStore, DraftStore, ProfileStore, SubmissionLog};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CandidateSource>,
    pub registry: Option<Arc<RegistryClient>>,
    pub gateway: SubmissionGateway,
    pub matcher: Matcher,
    pub profile: Arc<ProfileStore>,
    pub deck: Arc<DeckStore>,
    pub drafts: Arc<DraftStore>,
    pub accounts: Arc<AccountStore>,
    pub submissions: Arc<SubmissionLog>,
}

impl AppState {
    /// Rehydrate every store from `store` and wire the collaborators
    ///
    /// With a registry, submissions go through it; otherwise the mock
    /// gateway is used.
    pub fn new(
        store: Arc<dyn LocalStore>,
        catalog: Arc<dyn CandidateSource>,
        registry: Option<Arc<RegistryClient>>,
        matcher: Matcher,
        policy: DecisionLogPolicy,
    ) -> Self {
        let gateway = match &registry {
            Some(client) => SubmissionGateway::Registry(client.clone()),
            None => SubmissionGateway::Mock,
        };

        Self {
            catalog,
            registry,
            gateway,
            matcher,
            profile: Arc::new(ProfileStore::load(store.clone())),
            deck: Arc::new(DeckStore::load(store.clone(), policy)),
            drafts: Arc::new(DraftStore::load(store.clone())),
            accounts: Arc::new(AccountStore::new(store.clone())),
            submissions: Arc::new(SubmissionLog::load(store)),
        }
    }

    /// Grant lookup: current deck, then catalog, then the registry
    ///
    /// `Ok(None)` means no source knows the id.
    pub async fn resolve_grant(&self, grant_id: &str) -> Result<Option<Grant>, RegistryError> {
        if let Some(grant) = self.deck.find(grant_id) {
            return Ok(Some(grant));
        }
        if let Ok(grant) = self.catalog.get_by_id(grant_id) {
            return Ok(Some(grant));
        }

        let Some(registry) = &self.registry else {
            return Ok(None);
        };
        match registry.get_grant(grant_id).await {
            Ok(grant) => Ok(Some(grant)),
            Err(RegistryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(grants::configure)
            .configure(profile::configure)
            .configure(deck::configure)
            .configure(drafts::configure)
            .configure(account::configure),
    );
}

pub(crate) const SHORTLIST_PATH: &str = "/api/v1/shortlist";

/// Unknown grants send the user back to the shortlist
pub(crate) fn redirect_to_shortlist(grant_id: &str) -> HttpResponse {
    tracing::info!("Grant {} not found, redirecting to shortlist", grant_id);
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SHORTLIST_PATH))
        .finish()
}

pub(crate) fn storage_failure(e: StorageError) -> HttpResponse {
    tracing::error!("Failed to persist state: {}", e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "Failed to persist state",
        e.to_string(),
        500,
    ))
}

pub(crate) fn registry_failure(e: RegistryError) -> HttpResponse {
    tracing::error!("Registry request failed: {}", e);
    HttpResponse::BadGateway().json(ErrorResponse::new(
        "Registry request failed",
        e.to_string(),
        502,
    ))
}
