use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, MatchResponse, Profile};
use crate::routes::{redirect_to_shortlist, registry_failure, AppState};

/// Configure catalog and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/grants", web::get().to(list_grants))
        .route("/grants/match", web::post().to(match_grants))
        .route("/grants/{id}", web::get().to(get_grant));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/grants
async fn list_grants(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.all_candidates())
}

/// Match a profile against the catalog
///
/// POST /api/v1/grants/match
///
/// Request body is a profile:
/// ```json
/// {
///   "industry": "technology",
///   "location": "Kuala Lumpur",
///   "teamSizeBracket": "11-50",
///   "needs": ["Digitalisation", "Growth"],
///   "years": 3
/// }
/// ```
async fn match_grants(state: web::Data<AppState>, profile: web::Json<Profile>) -> impl Responder {
    let result = state
        .matcher
        .find_matches(&profile, state.catalog.all_candidates());

    tracing::debug!(
        "Matched {} of {} grants for industry {:?}",
        result.matches.len(),
        result.total_candidates,
        profile.industry
    );

    let grants = result.into_grants();
    HttpResponse::Ok().json(MatchResponse {
        total_count: grants.len(),
        grants,
    })
}

/// Grant detail
///
/// GET /api/v1/grants/{id}
///
/// Unknown ids redirect to the shortlist instead of returning 404.
async fn get_grant(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();

    match state.resolve_grant(&grant_id).await {
        Ok(Some(grant)) => HttpResponse::Ok().json(grant),
        Ok(None) => redirect_to_shortlist(&grant_id),
        Err(e) => registry_failure(e),
    }
}
