//! Request-boundary errors and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use note_taking_types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,
    #[error("Invalid JSON format")]
    InvalidJson,
    #[error("Missing 'text' field in request")]
    MissingText,
    #[error("Note text must be a string")]
    TextNotString,
    #[error("Note text cannot be empty")]
    EmptyText,
    #[error("Note with id {0} not found")]
    NoteNotFound(u64),
    #[error("Endpoint not found")]
    EndpointNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedContentType
            | ApiError::InvalidJson
            | ApiError::MissingText
            | ApiError::TextNotString
            | ApiError::EmptyText => StatusCode::BAD_REQUEST,
            ApiError::NoteNotFound(_) | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note id space exhausted")]
    IdsExhausted,
}

/// Failure of the durability attempt that follows a committed mutation.
/// Logged by the store, never shown to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write notes file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmptyText.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoteNotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EndpointNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_names_id() {
        assert_eq!(
            ApiError::NoteNotFound(9999).to_string(),
            "Note with id 9999 not found"
        );
    }
}
