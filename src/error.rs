use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;
use tokio_cron_scheduler::JobSchedulerError;

/// Custom Error and Result types to unify errors from all sources.
pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, PartialEq)]
pub enum BoardError {
    Validation(String),
    NotFound(String),
    Persistence(String),
    Config(String),
    Scheduler(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::Validation(s) => write!(f, "Validation Error: {}", s),
            BoardError::NotFound(s) => write!(f, "Not Found: {}", s),
            BoardError::Persistence(s) => write!(f, "Persistence Error: {}", s),
            BoardError::Config(s) => write!(f, "Config Error: {}", s),
            BoardError::Scheduler(s) => write!(f, "Scheduler Error: {}", s),
        }
    }
}

impl Error for BoardError {}

impl BoardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::Persistence(_) | BoardError::Config(_) | BoardError::Scheduler(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let body = match &self {
            BoardError::Validation(s) | BoardError::NotFound(s) => s.clone(),
            other => other.to_string(),
        };
        (self.status_code(), Json(json!({ "error": body }))).into_response()
    }
}

impl From<std::io::Error> for BoardError {
    fn from(error: std::io::Error) -> Self {
        BoardError::Persistence(error.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(error: serde_json::Error) -> Self {
        BoardError::Persistence(error.to_string())
    }
}

impl From<figment::Error> for BoardError {
    fn from(error: figment::Error) -> Self {
        BoardError::Config(error.to_string())
    }
}

impl From<JobSchedulerError> for BoardError {
    fn from(error: JobSchedulerError) -> Self {
        BoardError::Scheduler(error.to_string())
    }
}

// Malformed request bodies and query strings are client errors like any other
// failed validation, and get the same JSON error body.
impl From<JsonRejection> for BoardError {
    fn from(rejection: JsonRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for BoardError {
    fn from(rejection: QueryRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}
