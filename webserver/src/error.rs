//! WebServer-specific error types
//!
//! Every handler error becomes a JSON body `{code, message, details?}` with a
//! status code matching the failure.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use engine::EngineError;
use shared::{ProcessId, process_error};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WebServerError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest {
            details: details.into(),
        }
    }

    /// Status code and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            WebServerError::Engine(error) => match error {
                EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                EngineError::ValidationRejected(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_REJECTED")
                }
                EngineError::MalformedSnapshot { .. } => {
                    (StatusCode::BAD_REQUEST, "MALFORMED_SNAPSHOT")
                }
                EngineError::GatewayFailure { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "GATEWAY_FAILURE")
                }
                EngineError::SharedError(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
                EngineError::IdSpaceExhausted { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "ID_SPACE_EXHAUSTED")
                }
            },
            WebServerError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = match &self {
            WebServerError::InvalidRequest { details } => {
                ApiError::new(code, "Invalid request").with_details(details.clone())
            }
            WebServerError::Engine(EngineError::ValidationRejected(rejection)) => {
                ApiError::new(code, rejection.to_string())
            }
            other => ApiError::new(code, other.to_string()),
        };

        if status.is_server_error() {
            process_error!(ProcessId::current(), "❌ {} {}: {}", status.as_u16(), code, self);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for WebServerError {
    fn from(rejection: JsonRejection) -> Self {
        WebServerError::invalid_request(rejection.body_text())
    }
}

impl From<PathRejection> for WebServerError {
    fn from(rejection: PathRejection) -> Self {
        WebServerError::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for WebServerError {
    fn from(rejection: QueryRejection) -> Self {
        WebServerError::invalid_request(rejection.body_text())
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
