use crate::services::auth_service::AuthServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the HTTP API.
///
/// The body is always `{"error": "<code>"}` where the code is the variant name.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidEmailOrPassword,

    /// Reserved: no handler checks verification ids yet.
    #[error("Invalid verification id")]
    InvalidVerificationId,

    /// Reserved: login attempts are not rate limited yet.
    #[error("Too many attempts")]
    TooManyAttempts,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidEmailOrPassword => "InvalidEmailOrPassword",
            AppError::InvalidVerificationId => "InvalidVerificationId",
            AppError::TooManyAttempts => "TooManyAttempts",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidEmailOrPassword => StatusCode::NOT_FOUND,
            AppError::InvalidVerificationId => StatusCode::BAD_REQUEST,
            AppError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidEmailOrPassword => AppError::InvalidEmailOrPassword,
            AuthServiceError::Repository(e) => AppError::Internal(e.to_string()),
            AuthServiceError::Verification(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref detail) = self {
            tracing::error!("Request failed: {}", detail);
        }

        let body = json!({ "error": self.code() });
        (self.status(), Json(body)).into_response()
    }
}
