//! Error responses for the load-more endpoint

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::client::ApiError;
use crate::pagination::PaginationError;

/// A failed load-more request, rendered as a JSON error body
#[derive(Debug)]
pub struct LoadMoreError(pub PaginationError);

impl From<PaginationError> for LoadMoreError {
    fn from(err: PaginationError) -> Self {
        Self(err)
    }
}

impl LoadMoreError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            PaginationError::Exhausted => StatusCode::BAD_REQUEST,
            PaginationError::InFlight => StatusCode::CONFLICT,
            PaginationError::Api(ApiError::ForeignUrl(_) | ApiError::InvalidUrl { .. }) => {
                StatusCode::BAD_REQUEST
            }
            PaginationError::Api(ApiError::Status { .. }) => StatusCode::BAD_GATEWAY,
            PaginationError::Api(ApiError::Http { source, .. }) if source.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            PaginationError::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match &self.0 {
            PaginationError::Exhausted => "exhausted",
            PaginationError::InFlight => "in_flight",
            PaginationError::Api(ApiError::ForeignUrl(_)) => "foreign_url",
            PaginationError::Api(ApiError::InvalidUrl { .. }) => "invalid_url",
            PaginationError::Api(ApiError::Status { .. }) => "upstream_status",
            PaginationError::Api(ApiError::Decode { .. }) => "upstream_decode",
            PaginationError::Api(ApiError::Http { .. }) => "upstream_unavailable",
            PaginationError::Api(ApiError::NoMasterRef(_)) => "upstream_error",
        }
    }
}

impl IntoResponse for LoadMoreError {
    fn into_response(self) -> Response {
        tracing::warn!("Load more failed: {}", self.0);
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.0.to_string(),
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_url_is_bad_request() {
        let err = LoadMoreError(PaginationError::Api(ApiError::ForeignUrl(
            "https://evil.example.com".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "foreign_url");
    }

    #[test]
    fn test_upstream_status_is_bad_gateway() {
        let err = LoadMoreError(PaginationError::Api(ApiError::Status {
            status: 500,
            url: "https://repo.cdn.prismic.io/api/v2/documents/search".to_string(),
        }));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_in_flight_is_conflict() {
        let err = LoadMoreError(PaginationError::InFlight);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
