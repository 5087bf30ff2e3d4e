use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::SwipeError;
use crate::models::{ErrorResponse, SwipeRequest};
use crate::routes::{storage_failure, AppState};
use crate::stores::DeckError;

/// Configure deck and shortlist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/deck", web::get().to(get_deck))
        .route("/deck/load", web::post().to(load_deck))
        .route("/deck/swipe", web::post().to(swipe))
        .route("/deck/reset", web::post().to(reset_deck))
        .route("/deck/decisions", web::get().to(get_decisions))
        .route("/shortlist", web::get().to(get_shortlist))
        .route("/shortlist/{id}", web::put().to(add_to_shortlist))
        .route("/shortlist/{id}", web::delete().to(remove_from_shortlist));
}

async fn get_deck(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.deck.view())
}

/// Run the matcher on the stored profile and deal a new deck
///
/// POST /api/v1/deck/load
async fn load_deck(state: web::Data<AppState>) -> impl Responder {
    let profile = state.profile.get();
    let grants = state
        .matcher
        .find_matches(&profile, state.catalog.all_candidates())
        .into_grants();

    match state.deck.set_candidates(grants) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => storage_failure(e),
    }
}

/// Record a swipe on the card under the cursor
///
/// POST /api/v1/deck/swipe
///
/// Request body:
/// ```json
/// {
///   "grantId": "mdec-digital-boost",
///   "decision": "accept|reject"
/// }
/// ```
async fn swipe(state: web::Data<AppState>, req: web::Json<SwipeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation(&errors));
    }

    match state.deck.record_swipe(&req.grant_id, req.decision) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(DeckError::Swipe(e)) => {
            let error = match e {
                SwipeError::NotActive => "Deck is not active",
                SwipeError::NotCurrent { .. } => "Not the current grant",
            };
            HttpResponse::Conflict().json(ErrorResponse::new(error, e.to_string(), 409))
        }
        Err(DeckError::Storage(e)) => storage_failure(e),
    }
}

async fn reset_deck(state: web::Data<AppState>) -> impl Responder {
    match state.deck.reset() {
        Ok(()) => HttpResponse::Ok().json(state.deck.view()),
        Err(e) => storage_failure(e),
    }
}

async fn get_decisions(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.deck.decisions())
}

/// Shortlisted grants, in catalog order
///
/// GET /api/v1/shortlist
async fn get_shortlist(state: web::Data<AppState>) -> impl Responder {
    let ids = state.deck.shortlist_ids();
    HttpResponse::Ok().json(state.catalog.get_many(&ids))
}

async fn add_to_shortlist(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();
    match state.deck.shortlist_add(&grant_id) {
        Ok(added) => HttpResponse::Ok().json(serde_json::json!({
            "grantId": grant_id,
            "added": added,
            "shortlistIds": state.deck.shortlist_ids(),
        })),
        Err(e) => storage_failure(e),
    }
}

async fn remove_from_shortlist(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();
    match state.deck.shortlist_remove(&grant_id) {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({
            "grantId": grant_id,
            "removed": removed,
            "shortlistIds": state.deck.shortlist_ids(),
        })),
        Err(e) => storage_failure(e),
    }
}
