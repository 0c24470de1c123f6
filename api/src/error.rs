//! API Error Handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vibes_ballot::{BallotError, Identity};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid vote choice: {0}")]
    InvalidChoice(String),

    #[error("Already voted: {0}")]
    AlreadyVoted(Identity),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BallotError> for ApiError {
    fn from(err: BallotError) -> Self {
        match err {
            BallotError::AlreadyVoted(voter) => ApiError::AlreadyVoted(voter),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<vibes_storage::StorageError> for ApiError {
    fn from(err: vibes_storage::StorageError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg),
            ApiError::InvalidIdentity(msg) => (StatusCode::BAD_REQUEST, "invalid_identity", msg),
            ApiError::InvalidChoice(msg) => (StatusCode::BAD_REQUEST, "invalid_choice", msg),
            ApiError::AlreadyVoted(_) => (
                StatusCode::CONFLICT,
                "already_voted",
                "You have already voted".to_string(),
            ),
            ApiError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                format!("Failed to persist ballot: {}", msg),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_voted_maps_to_conflict() {
        let err: ApiError = BallotError::AlreadyVoted(Identity::from("0xa1")).into();
        assert!(matches!(err, ApiError::AlreadyVoted(_)));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_error_is_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = vibes_storage::StorageError::from(io).into();
        assert!(matches!(err, ApiError::Storage(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
