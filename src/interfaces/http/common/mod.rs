//! Shared HTTP plumbing: response envelope, validated JSON extraction and
//! domain-error mapping.

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard response wrapper for all REST endpoints.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map a domain error to its HTTP representation.
///
/// Every caller-visible failure is a transient, user-facing notification;
/// none are fatal to the process.
pub fn error_response<T>(error: &DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::DuplicateUser(_) => StatusCode::CONFLICT,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::StatusLocked(_) => StatusCode::CONFLICT,
        DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Advisory(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ApiResponse::error(error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (
                DomainError::NotFound {
                    entity: "Report",
                    field: "id",
                    value: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::DuplicateUser("a@x.com".into()),
                StatusCode::CONFLICT,
            ),
            (DomainError::Forbidden("nope".into()), StatusCode::FORBIDDEN),
            (DomainError::StatusLocked("R1".into()), StatusCode::CONFLICT),
            (
                DomainError::Persistence("io".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::Advisory("down".into()), StatusCode::BAD_GATEWAY),
        ];
        for (error, expected) in cases {
            let (status, _) = error_response::<()>(&error);
            assert_eq!(status, expected, "{error}");
        }
    }
}
