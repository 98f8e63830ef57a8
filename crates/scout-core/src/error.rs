//! Error types for the Scout client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Scout client stack.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The variants follow the
/// client-observable failure taxonomy: authentication failures are split by
/// whether a network call was made, remote rejections carry the server's
/// normalized detail message, and telemetry loss is its own variant so call
/// sites can drop it without pattern-matching on strings.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ScoutError {
    /// No auth token was supplied; raised before any network call
    #[error("Authentication required. Please sign in.")]
    AuthenticationRequired,

    /// The server rejected the supplied token (HTTP 401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Client-side input rejection (unsupported format, oversized clip, etc.)
    #[error("{0}")]
    Validation(String),

    /// Entity not found error with type information (HTTP 404 on detail lookups)
    #[error("{entity_type} not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The server rejected the request with a parseable detail message
    #[error("Request rejected ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    /// Transport failure, or a non-2xx response whose body could not be parsed
    #[error("Backend unavailable: {0}")]
    RemoteUnavailable(String),

    /// A telemetry call failed; deliberately never escalated past the call site
    #[error("Telemetry event lost: {0}")]
    TelemetryLost(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScoutError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an AuthenticationFailed error
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a RemoteRejected error
    pub fn remote_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a RemoteUnavailable error
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    /// Creates a TelemetryLost error
    pub fn telemetry_lost(message: impl Into<String>) -> Self {
        Self::TelemetryLost(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an authentication error of either kind
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired | Self::AuthenticationFailed(_)
        )
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a TelemetryLost error
    pub fn is_telemetry_lost(&self) -> bool {
        matches!(self, Self::TelemetryLost(_))
    }

    /// Check if this error indicates the operation is worth retrying as-is.
    ///
    /// Returns true only for `RemoteUnavailable`: authentication and
    /// validation errors need user action first, and rejections carry a
    /// server decision that a blind retry will not change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::RemoteUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ScoutError>`.
pub type Result<T> = std::result::Result<T, ScoutError>;
