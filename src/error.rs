use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::identity::DirectoryError;

/// ApiError
///
/// Handler-level failures and their HTTP status. Policy denials are not errors;
/// they are reported in the body of an `AccessDecision`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("caller is not permitted to use this endpoint")]
    Forbidden,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Directory(e) => {
                tracing::error!(error = %e, "identity directory unavailable");
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            }
        }
    }
}
