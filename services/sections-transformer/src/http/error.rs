//! HTTP status mapping for core errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::TransformerError;
use crate::core::types::ErrorResponse;

impl TransformerError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        if self.is_conflict() {
            StatusCode::CONFLICT
        } else if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// JSON `{"message": ...}` response with the given status
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        message: message.into(),
    });
    (status, body).into_response()
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for TransformerError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self.message())
    }
}
