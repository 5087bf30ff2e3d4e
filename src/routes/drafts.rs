use actix_web::{web, HttpResponse, Responder};

use crate::models::{Draft, ErrorResponse, SaveDraftRequest, SubmissionReceipt, SubmitRequest, SuggestRequest};
use crate::routes::{redirect_to_shortlist, registry_failure, storage_failure, AppState};
use crate::services::SubmissionError;

/// Configure draft, submission and confirmation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/drafts/{grant_id}", web::get().to(get_draft))
        .route("/drafts/{grant_id}", web::put().to(save_draft))
        .route("/drafts/{grant_id}", web::delete().to(delete_draft))
        .route("/drafts/{grant_id}/suggest", web::post().to(suggest))
        .route("/submit/{grant_id}", web::post().to(submit))
        .route("/submissions/{grant_id}", web::get().to(get_submission));
}

fn no_draft(grant_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Draft not found",
        format!("No draft saved for {}", grant_id),
        404,
    ))
}

/// Saved draft, or a generated letter for a grant that has none yet
///
/// GET /api/v1/drafts/{grantId}
async fn get_draft(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();

    if let Some(draft) = state.drafts.get(&grant_id) {
        return HttpResponse::Ok().json(draft);
    }

    let grant = match state.resolve_grant(&grant_id).await {
        Ok(Some(grant)) => grant,
        Ok(None) => return redirect_to_shortlist(&grant_id),
        Err(e) => return registry_failure(e),
    };

    match state.drafts.get_or_generate(&grant) {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => storage_failure(e),
    }
}

/// Save edited draft content
///
/// PUT /api/v1/drafts/{grantId}
///
/// With a registry configured the remote draft is patched first; a
/// rejected update leaves the local draft unchanged.
async fn save_draft(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SaveDraftRequest>,
) -> impl Responder {
    let grant_id = path.into_inner();
    let content = req.into_inner().content;

    if let Some(registry) = &state.registry {
        if let Err(e) = registry.update_draft(&Draft::id_for(&grant_id), &content).await {
            return registry_failure(e);
        }
    }

    match state.drafts.save(&grant_id, content) {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => storage_failure(e),
    }
}

async fn delete_draft(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();
    match state.drafts.delete(&grant_id) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => no_draft(&grant_id),
        Err(e) => storage_failure(e),
    }
}

/// Rewrite the saved draft
///
/// POST /api/v1/drafts/{grantId}/suggest
///
/// Request body:
/// ```json
/// { "kind": "clarity|shorten|formal" }
/// ```
async fn suggest(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SuggestRequest>,
) -> impl Responder {
    let grant_id = path.into_inner();
    match state.drafts.apply_suggestion(&grant_id, req.kind) {
        Ok(Some(draft)) => HttpResponse::Ok().json(draft),
        Ok(None) => no_draft(&grant_id),
        Err(e) => storage_failure(e),
    }
}

/// Submit an application
///
/// POST /api/v1/submit/{grantId}
///
/// Uses `content` from the body when present, otherwise the saved draft.
async fn submit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: Option<web::Json<SubmitRequest>>,
) -> impl Responder {
    let grant_id = path.into_inner();
    let content = req
        .and_then(|body| body.into_inner().content)
        .or_else(|| state.drafts.get(&grant_id).map(|draft| draft.content))
        .unwrap_or_default();

    let response = match state.gateway.submit(&grant_id, &content).await {
        Ok(response) => response,
        Err(SubmissionError::EmptyContent) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Empty application",
                SubmissionError::EmptyContent.to_string(),
                400,
            ));
        }
        Err(e) => {
            tracing::warn!("Submission for {} failed: {}", grant_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse::new(
                "Submission failed",
                e.to_string(),
                502,
            ));
        }
    };

    let receipt = SubmissionReceipt {
        grant_id: grant_id.clone(),
        application_id: response.application_id.clone().unwrap_or_default(),
        message: response.message.clone(),
        submitted_at: chrono::Utc::now(),
    };
    if let Err(e) = state.submissions.record(receipt) {
        return storage_failure(e);
    }

    HttpResponse::Ok().json(response)
}

/// Confirmation for the submitted page
///
/// GET /api/v1/submissions/{grantId}
async fn get_submission(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let grant_id = path.into_inner();
    match state.submissions.get(&grant_id) {
        Some(receipt) => HttpResponse::Ok().json(receipt),
        None => HttpResponse::NotFound().json(ErrorResponse::new(
            "Submission not found",
            format!("No submission recorded for {}", grant_id),
            404,
        )),
    }
}
