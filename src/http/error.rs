//! Mapping of service failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contacts::ContactError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path, query or body.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Contact(#[from] ContactError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Contact(ContactError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Contact(ContactError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Contact(ContactError::IdSpaceExhausted(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Contact(ContactError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::ValidationError;
    use crate::storage::StorageError;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body) = body_of(ContactError::Validation(ValidationError::EmptyName).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "contact name cannot be empty");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = body_of(ContactError::NotFound(7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "contact 7 not found");
    }

    #[tokio::test]
    async fn test_storage_maps_to_500() {
        let storage = StorageError::Io(std::io::Error::other("disk full"));
        let (status, _) = body_of(ContactError::Storage(storage).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_exhausted_ids_map_to_500() {
        let (status, body) = body_of(ContactError::IdSpaceExhausted(u64::MAX).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, format!("no contact id left after {}", u64::MAX));
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message() {
        let (status, body) = body_of(ApiError::BadRequest("id must be a positive integer".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "id must be a positive integer");
    }
}
