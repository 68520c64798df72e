use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::services::ServiceError;
use serde_json::json;

/// Maps core failures to transport responses. A refused delete is an
/// expected business outcome and carries a user-facing message.
pub enum ApiError {
    Service(ServiceError),
    Conflict(&'static str),
}

impl ApiError {
    pub fn conflict(message: &'static str) -> Self {
        Self::Conflict(message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Service(ServiceError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not found" })),
            )
                .into_response(),
            ApiError::Service(ServiceError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::Service(ServiceError::Conflict) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Record is still referenced" })),
            )
                .into_response(),
            ApiError::Service(ServiceError::Database(err)) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
