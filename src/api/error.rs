use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorKind, HrError};

/// Business errors are exposed as-is; storage failures are logged in full and
/// reported to the client as a generic message.
impl IntoResponse for HrError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::Validation => {
                tracing::warn!("Validation error: {}", self);
                match self {
                    HrError::Validation(errors) => {
                        (StatusCode::BAD_REQUEST, Json(errors)).into_response()
                    }
                    other => (StatusCode::BAD_REQUEST, other.to_string()).into_response(),
                }
            }
            ErrorKind::NotFound => {
                tracing::warn!("Not found: {}", self);
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            ErrorKind::Conflict => {
                tracing::warn!("Conflict: {}", self);
                (StatusCode::CONFLICT, self.to_string()).into_response()
            }
            ErrorKind::BadRequest => {
                tracing::warn!("Bad request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ErrorKind::Internal => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
