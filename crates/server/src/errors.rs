use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::errors::ErrorClass;
use service::auth::AuthError;
use thiserror::Error;
use tracing::{error, warn};

pub const MISSING_TOKEN: &str = "Token de acesso não foi fornecido ou inválido.";

/// Handler-level failure, rendered as `{"errors": [..]}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("missing bearer token")]
    MissingToken,
    /// Request body could not be read as the expected JSON document.
    #[error("malformed request body: {message}")]
    BadRequest { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, ErrorBody::single(MISSING_TOKEN)),
            ApiError::BadRequest { status, message } => {
                warn!(%status, %message, "request body rejected");
                (status, ErrorBody::single(message))
            }
            ApiError::Auth(err) => {
                if err.class() == ErrorClass::Internal {
                    error!(code = err.code(), error = %err, "request failed");
                }
                let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, ErrorBody::new(err.public_messages()))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage initialisation failed: {0}")]
    Storage(String),
}
