//! Typed error handling for the shopfront service
//!
//! Every failure a request can hit maps to exactly one status code and a JSON
//! body of the form `{"error": "<message>"}`. Validation failures add the
//! first rejected field and its fixed message.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups that resolve to nothing (404)
//! - [`ValidationError`]: malformed payloads and rejected fields (400)
//! - [`StorageError`]: store failures other than not-found (500)
//! - [`RequestError`]: authentication failures (401 / 500)
//! - [`ConfigError`]: configuration loading problems
//!
//! # Example
//!
//! ```rust,ignore
//! let product = service
//!     .get(id)
//!     .await
//!     .map_err(|e| StorageError::failed::<Product>(Operation::Retrieve, e))?
//!     .ok_or_else(|| EntityError::not_found::<Product>(id))?;
//! ```

use crate::core::entity::Entity;
use crate::core::validation::FieldViolation;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the shopfront service
#[derive(Debug)]
pub enum ShopError {
    /// Lookup errors (missing records, empty searches)
    Entity(EntityError),

    /// Payload and field validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Authentication errors
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::Entity(e) => write!(f, "{}", e),
            ShopError::Validation(e) => write!(f, "{}", e),
            ShopError::Storage(e) => write!(f, "{}", e),
            ShopError::Request(e) => write!(f, "{}", e),
            ShopError::Config(e) => write!(f, "{}", e),
            ShopError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ShopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShopError::Entity(e) => Some(e),
            ShopError::Validation(e) => Some(e),
            ShopError::Storage(e) => Some(e),
            ShopError::Request(e) => Some(e),
            ShopError::Config(e) => Some(e),
            ShopError::Internal(_) => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// First rejected field, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Fixed message attached to the rejected field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ShopError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShopError::Entity(e) => e.status_code(),
            ShopError::Validation(_) => StatusCode::BAD_REQUEST,
            ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Request(e) => e.status_code(),
            ShopError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ShopError::Validation(ValidationError::Field(violation)) => ErrorResponse {
                error: ValidationError::Field(violation.clone()).to_string(),
                field: Some(violation.field.to_string()),
                message: Some(violation.message.to_string()),
            },
            other => ErrorResponse {
                error: other.to_string(),
                field: None,
                message: None,
            },
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors for lookups that resolve to nothing
#[derive(Debug)]
pub enum EntityError {
    /// Identifier does not resolve to a live record
    NotFound { label: &'static str, id: u32 },

    /// A search matched zero records
    NoneFound { resource: &'static str },
}

impl EntityError {
    pub fn not_found<T: Entity>(id: u32) -> Self {
        EntityError::NotFound {
            label: T::label(),
            id,
        }
    }

    pub fn none_found<T: Entity>() -> Self {
        EntityError::NoneFound {
            resource: T::resource_name(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::NoneFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { label, .. } => write!(f, "{} not found", label),
            EntityError::NoneFound { resource } => {
                write!(f, "No {} found", resource.replace('_', " "))
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for ShopError {
    fn from(err: EntityError) -> Self {
        ShopError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Payload could not be parsed into the expected shape
    InvalidJson { message: String },

    /// Path identifier is not an unsigned 32-bit integer
    InvalidId { value: String },

    /// A setter rejected a field
    Field(FieldViolation),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidJson { .. } => write!(f, "Invalid JSON data"),
            ValidationError::InvalidId { .. } => write!(f, "Invalid ID"),
            ValidationError::Field(_) => write!(f, "Validation error"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ShopError {
    fn from(err: ValidationError) -> Self {
        ShopError::Validation(err)
    }
}

impl From<FieldViolation> for ShopError {
    fn from(violation: FieldViolation) -> Self {
        ShopError::Validation(ValidationError::Field(violation))
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// The repository operation a storage failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Retrieve,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn gerund(&self) -> &'static str {
        match self {
            Operation::Retrieve => "retrieving",
            Operation::Create => "creating",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
        }
    }
}

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A store call failed for a reason other than not-found
    OperationFailed {
        resource: &'static str,
        operation: Operation,
        message: String,
    },

    /// Could not connect to the backend
    ConnectionError { backend: String, message: String },
}

impl StorageError {
    pub fn failed<T: Entity>(operation: Operation, err: impl fmt::Display) -> Self {
        StorageError::OperationFailed {
            resource: T::resource_name_singular(),
            operation,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OperationFailed {
                resource,
                operation,
                ..
            } => write!(
                f,
                "Error {} {}",
                operation.gerund(),
                resource.replace('_', " ")
            ),
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ShopError {
    fn from(err: StorageError) -> Self {
        ShopError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to authentication
#[derive(Debug)]
pub enum RequestError {
    /// Missing or invalid bearer token
    Unauthorized,

    /// Login credentials did not match
    InvalidCredentials,

    /// A token could not be signed
    TokenIssuance { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized => write!(f, "Unauthorized"),
            RequestError::InvalidCredentials => write!(f, "Invalid username or password"),
            RequestError::TokenIssuance { .. } => write!(f, "Could not generate token"),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized => StatusCode::UNAUTHORIZED,
            RequestError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            RequestError::TokenIssuance { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RequestError> for ShopError {
    fn from(err: RequestError) -> Self {
        ShopError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io { file: String, message: String },

    /// The configuration could not be parsed
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// An override carried an unusable value
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { file, message } => {
                write!(f, "Failed to read config file '{}': {}", file, message)
            }
            ConfigError::ParseError {
                file: Some(file),
                message,
            } => write!(f, "Failed to parse config file '{}': {}", file, message),
            ConfigError::ParseError {
                file: None,
                message,
            } => write!(f, "Failed to parse config: {}", message),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid value for '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ShopError {
    fn from(err: ConfigError) -> Self {
        ShopError::Config(err)
    }
}

impl From<anyhow::Error> for ShopError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ShopError>() {
            Ok(shop_err) => shop_err,
            Err(err) => ShopError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = EntityError::NotFound {
            label: "Product",
            id: 7,
        };
        assert_eq!(err.to_string(), "Product not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_none_found_message_replaces_underscores() {
        let err = EntityError::NoneFound {
            resource: "order_items",
        };
        assert_eq!(err.to_string(), "No order items found");
    }

    #[test]
    fn test_storage_error_message() {
        let err = StorageError::OperationFailed {
            resource: "shipping_details",
            operation: Operation::Delete,
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Error deleting shipping details");
        assert_eq!(
            ShopError::from(err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_response_carries_field() {
        let err = ShopError::from(FieldViolation {
            field: "rating",
            message: "Rating must be between 0 and 5",
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_response();
        assert_eq!(body.error, "Validation error");
        assert_eq!(body.field.as_deref(), Some("rating"));
        assert_eq!(
            body.message.as_deref(),
            Some("Rating must be between 0 and 5")
        );
    }

    #[test]
    fn test_error_response_serialization_omits_empty_fields() {
        let err = ShopError::from(ValidationError::InvalidJson {
            message: "EOF while parsing".to_string(),
        });
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid JSON data" }));
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            RequestError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RequestError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RequestError::TokenIssuance {
                message: "bad key".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            file: Some("shopfront.yaml".to_string()),
            message: "invalid syntax".to_string(),
        };
        assert!(err.to_string().contains("shopfront.yaml"));
    }

    #[test]
    fn test_from_anyhow_recovers_shop_error() {
        let inner = anyhow::Error::new(ShopError::Request(RequestError::Unauthorized));
        let err = ShopError::from(inner);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
