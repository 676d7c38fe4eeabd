//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::InventoryError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn internal() -> Self {
        Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            .with_detail("An unexpected error occurred")
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        if status == StatusCode::UNAUTHORIZED {
            headers.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: InventoryError) -> Problem {
    match error {
        InventoryError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        InventoryError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        InventoryError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        InventoryError::InsufficientStock {
            product,
            available,
            requested,
        } => Problem::new(StatusCode::CONFLICT, "Insufficient Stock").with_detail(format!(
            "Insufficient stock for {}. Available: {}, Requested: {}",
            product, available, requested
        )),

        InventoryError::Unauthorized { reason } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(reason)
        }

        InventoryError::Forbidden { reason } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(reason)
        }

        InventoryError::Internal => Problem::internal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (InventoryError::not_found("Product", 7), StatusCode::NOT_FOUND),
            (InventoryError::conflict("dup"), StatusCode::CONFLICT),
            (InventoryError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                InventoryError::InsufficientStock {
                    product: "A".into(),
                    available: 1,
                    requested: 2,
                },
                StatusCode::CONFLICT,
            ),
            (InventoryError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (InventoryError::forbidden("no"), StatusCode::FORBIDDEN),
            (InventoryError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status.as_u16());
        }
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = map_domain_error(InventoryError::unauthorized("expired")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
