//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Oasis                                  │
//! │                                                                         │
//! │  Form submit                 Command function                           │
//! │  ───────────                 ────────────────                           │
//! │                                                                         │
//! │  create_room(input)                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<CommandResponse<T>, ApiError>                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ── ValidationError { field } ──► ApiError ───►│  │
//! │  │         │                  (store untouched)                     │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ── store mutated ── Notice::success ───────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Frontend highlights `field` and shows `message`.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use oasis_core::{CoreError, UnknownToken, ValidationError};
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "checkOut must be after checkIn",
///   "field": "checkOut"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Form field to highlight, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// A store invariant was violated (duplicate id)
    InvariantViolation,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Creates a validation error for one form field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.field(), err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DuplicateId { .. } => {
                tracing::error!("Store invariant violated: {}", err);
                ApiError::new(ErrorCode::InvariantViolation, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Unknown filter value ("?status=sleeping").
impl From<UnknownToken> for ApiError {
    fn from(err: UnknownToken) -> Self {
        ApiError::validation(err.kind, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_field() {
        let err: ApiError = ValidationError::NotAfter {
            field: "checkOut".to_string(),
            other: "checkIn".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("checkOut"));
        assert_eq!(err.message, "checkOut must be after checkIn");
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::validation("number", "number is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["field"], "number");

        let json = serde_json::to_value(ApiError::internal("boom")).unwrap();
        assert!(json.get("field").is_none());
    }

    #[test]
    fn test_duplicate_id_maps_to_invariant() {
        let err: ApiError = CoreError::DuplicateId { kind: "room", id: 3 }.into();
        assert_eq!(err.code, ErrorCode::InvariantViolation);
    }
}
