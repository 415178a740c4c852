//! HTTP handlers and the response envelope every one of them returns.

pub mod status;
pub mod tenant;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::metrics;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Failure,
    /// Only used by the not-found fallback
    Failed,
}

/// `{status, data}` or `{status, message}`
#[derive(Debug, Serialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error("Can't find {0} on this server!")]
    NotFound(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => EnvelopeStatus::Failed,
            _ => EnvelopeStatus::Failure,
        };
        let body: Envelope = Envelope {
            status,
            data: None,
            message: Some(self.to_string()),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Count the outcome and turn it into the final response
pub(crate) fn respond<T: Serialize>(
    endpoint: &str,
    result: Result<Envelope<T>, ApiError>,
) -> Response {
    match result {
        Ok(envelope) => {
            metrics::record_request(endpoint, "success");
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(err) => {
            let outcome = match err {
                ApiError::BadRequest(_) => "bad_request",
                ApiError::Internal(_) => "internal_error",
                ApiError::NotFound(_) => "not_found",
            };
            metrics::record_request(endpoint, outcome);
            err.into_response()
        }
    }
}

/// `GET /test`
pub async fn test_page() -> Response {
    respond::<()>("test", Ok(Envelope::message("Test Page!")))
}

/// Catch-all for unknown paths and unsupported methods
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    respond::<()>("fallback", Err(ApiError::NotFound(uri.to_string())))
}
