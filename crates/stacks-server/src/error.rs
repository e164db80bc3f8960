use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use stacks_auth::AuthError;
use stacks_catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status for this error, per the reference service's mapping:
    /// not-found conditions are 404, credential failures 401, a missing
    /// bearer token 401, an unverifiable or expired one 403, registration
    /// conflicts 400, everything else 500.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::BookNotFound(_))
            | Self::Catalog(CatalogError::ReviewNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Auth(AuthError::DuplicateUser(_)) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::InvalidCredentials) | Self::Auth(AuthError::MissingToken) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::InvalidToken) | Self::Auth(AuthError::ExpiredToken) => {
                StatusCode::FORBIDDEN
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short client-facing message. Internal detail stays in the logs.
    fn message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::BookNotFound(_)) => "Book not found".into(),
            Self::Catalog(CatalogError::ReviewNotFound { .. }) => "Review not found".into(),
            Self::Auth(AuthError::DuplicateUser(_)) => "User already exists".into(),
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".into(),
            Self::Auth(err) => err.to_string(),
            _ => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
