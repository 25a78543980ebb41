use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::intake::PositionRequest;
use super::repository::CandidateRepository;
use super::service::{AllotmentRequest, MatchingService, MatchingServiceError};

/// Router builder exposing candidate intake, ranking and allotment endpoints.
pub fn matching_router<R>(service: Arc<MatchingService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(upload_handler::<R>))
        .route("/api/v1/positions/presets", get(presets_handler::<R>))
        .route("/api/v1/form-data", get(form_data_handler::<R>))
        .route("/api/v1/rankings", post(ranking_handler::<R>))
        .route("/api/v1/allotments", post(allotment_handler::<R>))
        .with_state(service)
}

pub(crate) async fn upload_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    body: String,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.load_candidates(body.as_bytes()) {
        Ok(rows_loaded) => {
            let payload = json!({
                "status": "success",
                "rows_loaded": rows_loaded,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn presets_handler<R>(State(service): State<Arc<MatchingService<R>>>) -> Response
where
    R: CandidateRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.presets())).into_response()
}

pub(crate) async fn form_data_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.form_data().clone())).into_response()
}

pub(crate) async fn ranking_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    axum::Json(request): axum::Json<PositionRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.rank(request) {
        Ok(ranking) => (StatusCode::OK, axum::Json(ranking)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn allotment_handler<R>(
    State(service): State<Arc<MatchingService<R>>>,
    axum::Json(request): axum::Json<AllotmentRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.allot(request) {
        Ok(report) => (StatusCode::OK, axum::Json(report.view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = match &error {
        MatchingServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    if status.is_server_error() {
        tracing::error!(%error, "matching request failed");
    } else {
        tracing::warn!(%error, "matching request rejected");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
