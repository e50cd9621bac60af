//! Error types for the eximcheck server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::StoreError;
use doc_lifecycle::{ProviderError, TrackError};

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("job already registered: {0}")]
    DuplicateJob(String),

    #[error("job is in a terminal state: {0}")]
    TerminalJob(String),

    #[error("tracking timed out after {0:?}")]
    TrackingTimeout(std::time::Duration),

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServerError::JobNotFound(id),
            StoreError::Duplicate(id) => ServerError::DuplicateJob(id),
            StoreError::Terminal { id, status } => {
                ServerError::TerminalJob(format!("{} ({})", id, status))
            }
        }
    }
}

impl From<TrackError> for ServerError {
    fn from(err: TrackError) -> Self {
        match err {
            TrackError::Timeout(bound) => ServerError::TrackingTimeout(bound),
            TrackError::Failed(message) => ServerError::ProcessingFailed(message),
            TrackError::Provider(ProviderError::NotFound(id)) => ServerError::JobNotFound(id),
            TrackError::Provider(ProviderError::Transport(message)) => {
                ServerError::ProcessingFailed(message)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::JobNotFound(_) => (StatusCode::NOT_FOUND, "JOB_NOT_FOUND"),
            ServerError::DuplicateJob(_) => (StatusCode::CONFLICT, "DUPLICATE_JOB"),
            ServerError::TerminalJob(_) => (StatusCode::CONFLICT, "TERMINAL_STATE"),
            ServerError::TrackingTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TRACKING_TIMEOUT"),
            ServerError::ProcessingFailed(_) => (StatusCode::BAD_GATEWAY, "PROCESSING_FAILED"),
        };

        if status.is_server_error() {
            tracing::error!(code, "request failed: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": code,
        }));

        (status, body).into_response()
    }
}
