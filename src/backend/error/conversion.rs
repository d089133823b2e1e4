/**
 * Error Conversion
 *
 * This module turns `BackendError` into HTTP responses and converts framework
 * rejections into `BackendError`, so every failure leaves the server in the
 * same shape.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Please check your input and try again.",
 *   "errors": [{ "field": "email", "message": "Please enter a valid email" }]
 * }
 * ```
 *
 * `errors` is only present for validation failures.
 */

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::error::FieldError;

/// Uniform failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl From<&BackendError> for ErrorBody {
    fn from(err: &BackendError) -> Self {
        Self {
            success: false,
            message: err.message(),
            errors: err.field_errors(),
        }
    }
}

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side failures are logged here with their full cause; the client
    /// only ever sees the generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected JSON body: {}", rejection.body_text());
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                BackendError::bad_request("Request body must be JSON.")
            }
            _ => BackendError::bad_request("Invalid data format. Please try again."),
        }
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::warn!("Rejected multipart body: {}", rejection.body_text());
        BackendError::bad_request("Invalid form data. Please send the post as multipart/form-data.")
    }
}
