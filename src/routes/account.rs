use actix_web::{web, HttpResponse, Responder};

use crate::models::{CreateAccountRequest, ErrorResponse, SavePreferencesRequest};
use crate::routes::{storage_failure, AppState};
use crate::stores::AccountError;

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/account", web::get().to(get_account))
        .route("/account", web::post().to(create_account))
        .route("/account", web::delete().to(clear_account))
        .route("/account/preferences", web::get().to(get_preferences))
        .route("/account/preferences", web::put().to(save_preferences));
}

fn account_failure(e: AccountError) -> HttpResponse {
    match e {
        AccountError::Validation(errors) => {
            tracing::info!("Account form rejected: {}", errors);
            HttpResponse::BadRequest().json(ErrorResponse::validation(&errors))
        }
        AccountError::Invalid(what) => HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            format!("Invalid {} data", what),
            400,
        )),
        AccountError::Storage(e) => storage_failure(e),
    }
}

fn no_account() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Account not found",
        "No account has been created",
        404,
    ))
}

/// Account joined with its preferences
///
/// GET /api/v1/account
async fn get_account(state: web::Data<AppState>) -> impl Responder {
    match state.accounts.get_with_preferences() {
        Some(account) => HttpResponse::Ok().json(account),
        None => no_account(),
    }
}

/// Create the business account
///
/// POST /api/v1/account
///
/// Request body:
/// ```json
/// {
///   "businessName": "Kedai Runcit Sdn Bhd",
///   "email": "owner@kedai.my"
/// }
/// ```
async fn create_account(
    state: web::Data<AppState>,
    req: web::Json<CreateAccountRequest>,
) -> impl Responder {
    match state.accounts.create(req.into_inner()) {
        Ok(account) => HttpResponse::Created().json(account),
        Err(e) => account_failure(e),
    }
}

async fn clear_account(state: web::Data<AppState>) -> impl Responder {
    state.accounts.clear();
    HttpResponse::NoContent().finish()
}

async fn get_preferences(state: web::Data<AppState>) -> impl Responder {
    match state.accounts.get_preferences() {
        Some(preferences) => HttpResponse::Ok().json(preferences),
        None => HttpResponse::NotFound().json(ErrorResponse::new(
            "Preferences not found",
            "No preferences have been saved",
            404,
        )),
    }
}

async fn save_preferences(
    state: web::Data<AppState>,
    req: web::Json<SavePreferencesRequest>,
) -> impl Responder {
    match state.accounts.save_preferences(req.into_inner()) {
        Ok(preferences) => HttpResponse::Ok().json(preferences),
        Err(e) => account_failure(e),
    }
}
