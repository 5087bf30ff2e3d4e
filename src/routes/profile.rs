use actix_web::{web, HttpResponse, Responder};

use crate::models::{ErrorResponse, Profile, ProfileUpdate};
use crate::routes::{storage_failure, AppState};
use crate::stores::ProfileError;

/// Configure onboarding profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile", web::get().to(get_profile))
        .route("/profile", web::patch().to(update_profile))
        .route("/profile", web::delete().to(reset_profile))
        .route("/profile/complete", web::post().to(complete_profile));
}

async fn get_profile(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.profile.get())
}

/// Merge one or more questionnaire answers
///
/// PATCH /api/v1/profile
async fn update_profile(
    state: web::Data<AppState>,
    update: web::Json<ProfileUpdate>,
) -> impl Responder {
    match state.profile.update(update.into_inner()) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => storage_failure(e),
    }
}

async fn reset_profile(state: web::Data<AppState>) -> impl Responder {
    match state.profile.reset() {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => storage_failure(e),
    }
}

/// Finish onboarding
///
/// POST /api/v1/profile/complete
///
/// Stores the profile as complete and replaces the deck with a fresh match
/// for it. Decisions and shortlist carry over.
async fn complete_profile(state: web::Data<AppState>, body: web::Json<Profile>) -> impl Responder {
    let profile = match state.profile.complete(body.into_inner()) {
        Ok(profile) => profile,
        Err(ProfileError::Storage(e)) => return storage_failure(e),
        Err(e) => {
            tracing::info!("Rejected incomplete profile: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Profile incomplete",
                e.to_string(),
                400,
            ));
        }
    };

    let grants = state
        .matcher
        .find_matches(&profile, state.catalog.all_candidates())
        .into_grants();
    if let Err(e) = state.deck.set_candidates(grants) {
        return storage_failure(e);
    }

    HttpResponse::Ok().json(profile)
}
