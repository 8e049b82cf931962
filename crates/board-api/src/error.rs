use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use board_db::StorageError;
use board_types::api::{ErrorDetail, ErrorResponse};

/// Every failure a handler can return. Rendered as
/// `{"error": {"code", "message"}}` with a code that clients can match on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("'{0}' is not a valid id")]
    MalformedId(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("author {0} does not exist")]
    AuthorNotFound(Uuid),

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("request did not complete in time")]
    Timeout,

    #[error("storage failure")]
    Storage(#[source] StorageError),

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MalformedId(_) => "malformed_id",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::AuthorNotFound(_) => "author_not_found",
            ApiError::UsernameTaken(_) => "username_taken",
            ApiError::Timeout => "request_timeout",
            ApiError::Storage(_) => "storage_error",
            ApiError::Internal => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedId(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthorNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UsernameTaken(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Storage(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AuthorNotFound(id) => ApiError::AuthorNotFound(id),
            StorageError::UsernameTaken(name) => ApiError::UsernameTaken(name),
            other => ApiError::Storage(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Storage(source) => error!("Storage error: {}", source),
            _ if status.is_server_error() => error!("{}", self),
            _ => warn!("Rejected request ({}): {}", self.code(), self),
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_keep_their_meaning() {
        let author = Uuid::new_v4();
        let err = ApiError::from(StorageError::AuthorNotFound(author));
        assert_eq!(err.code(), "author_not_found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(StorageError::UsernameTaken("myuser".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = ApiError::from(StorageError::LockPoisoned);
        assert_eq!(err.code(), "storage_error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeout_is_a_408() {
        assert_eq!(ApiError::Timeout.code(), "request_timeout");
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn storage_details_stay_out_of_the_message() {
        let err = ApiError::from(StorageError::LockPoisoned);
        assert_eq!(err.to_string(), "storage failure");
    }
}
