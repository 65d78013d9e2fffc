use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Every failure a workflow can report. Responses carry the status code
/// only, never a body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid registration: {0}")]
    InvalidRegistration(&'static str),

    #[error("username already taken")]
    DuplicateUsername,

    #[error("username or password incorrect")]
    AuthenticationFailure,

    #[error("invalid message: {0}")]
    InvalidMessage(&'static str),

    /// Store or runtime fault. Not a client error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRegistration(_) | Self::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            error!("Internal error: {:#}", e);
        }
        self.status().into_response()
    }
}
