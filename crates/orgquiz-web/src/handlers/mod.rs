//! HTTP handlers for all API routes.

pub mod synthesis;
pub mod nomenclature;
pub mod system;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orgquiz_common::QuizError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Error returned by every handler, rendered as
/// `{ "status": "error", "kind": ..., "message": ..., "actionable": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Quiz(e) => match e {
                QuizError::DataUnavailable(_) | QuizError::DatasetNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                QuizError::InsufficientSelection
                | QuizError::InsufficientData { .. }
                | QuizError::InvalidRange(_)
                | QuizError::SearchExhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                QuizError::NoSolutionAtReveal | QuizError::UnknownCompound(_) => StatusCode::NOT_FOUND,
                QuizError::NoActiveProblem => StatusCode::CONFLICT,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Quiz(e) => e.kind(),
            ApiError::BadRequest(_) => "bad_request",
        }
    }

    /// Whether changing the form input can clear the error.
    pub fn is_user_actionable(&self) -> bool {
        match self {
            ApiError::Quiz(e) => e.is_user_actionable(),
            ApiError::BadRequest(_) => true,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{} ({})", self, self.kind());
        } else {
            debug!("{} ({})", self, self.kind());
        }

        let guidance = match &self {
            ApiError::Quiz(e) => e.guidance(),
            ApiError::BadRequest(_) => None,
        };
        let body = json!({
            "status": "error",
            "kind": self.kind(),
            "message": self.to_string(),
            "guidance": guidance,
            "actionable": self.is_user_actionable(),
        });
        (status, Json(body)).into_response()
    }
}
