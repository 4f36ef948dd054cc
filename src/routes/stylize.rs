use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app_state::AppState;
use crate::models::api::{ErrorResponse, StylizeBody, StylizeResponse};
use crate::models::stylize::{FailureKind, StylizeOutcome, StylizeRequest};

/// POST /api/stylize: stylize an image with the given style reference.
pub async fn stylize(
    State(state): State<AppState>,
    body: Result<Json<StylizeBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected stylize body");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            let error = ErrorResponse::new(format!("Invalid request body: {}", rejection.body_text()));
            return (status, Json(error)).into_response();
        }
    };

    let image = body.image.filter(|s| !s.trim().is_empty());
    let style = body.style.filter(|s| !s.trim().is_empty());
    let (Some(image), Some(style)) = (image, style) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing image or style")),
        )
            .into_response();
    };

    let cancel = state.shutdown.child_token();
    let outcome = state
        .orchestrator
        .stylize_with_cancel(StylizeRequest::new(image, style), &cancel)
        .await;

    match outcome {
        Some(StylizeOutcome::Success { image_ref }) => {
            (StatusCode::OK, Json(StylizeResponse { output: image_ref })).into_response()
        }
        Some(StylizeOutcome::Failure {
            kind,
            reason,
            retriable,
        }) => {
            let error = ErrorResponse {
                error: reason,
                kind: Some(kind),
                retriable,
            };
            (status_for(kind), Json(error)).into_response()
        }
        None => {
            let error = ErrorResponse {
                error: "Request abandoned: server is shutting down".to_string(),
                kind: None,
                retriable: true,
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(error)).into_response()
        }
    }
}

/// HTTP status returned to the browser for each failure kind.
pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation => StatusCode::BAD_REQUEST,
        FailureKind::JobFailed => StatusCode::INTERNAL_SERVER_ERROR,
        FailureKind::Transport
        | FailureKind::BackendRejected
        | FailureKind::Protocol
        | FailureKind::Timeout => StatusCode::BAD_GATEWAY,
    }
}
