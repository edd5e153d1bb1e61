use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepoError;

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Repo(RepoError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Repo(RepoError::MissingReference(_)) => StatusCode::NOT_FOUND,
            Self::Repo(RepoError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Repo(RepoError::Database(_) | RepoError::Hashing(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Repo(RepoError::InvalidText(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Client-facing message; storage details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Repo(RepoError::Conflict(_)) => "Resource already exists".into(),
            Self::Repo(RepoError::MissingReference(_)) => {
                "Referenced user or product not found".into()
            }
            Self::Repo(RepoError::Unavailable(_)) => "Service unavailable".into(),
            Self::Repo(RepoError::Database(_) | RepoError::Hashing(_)) => {
                "Internal server error".into()
            }
            Self::Repo(RepoError::InvalidText(_)) => "Invalid characters in input".into(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
