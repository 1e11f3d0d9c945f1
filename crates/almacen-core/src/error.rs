//! Error types for the Almacén bot.

use thiserror::Error;

/// A shared error type for the entire bot.
///
/// Variants fall into three groups: validation failures that are reported
/// back to the acting user, lookups that found nothing, and infrastructure
/// failures that are logged and surfaced as a generic message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlmacenError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A quantity that is not a positive integer
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A price that is not a non-negative decimal
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// An action identifier that does not match the grammar
    #[error("Invalid action identifier: {0}")]
    InvalidAction(String),

    /// Data access error (record store layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat platform API error
    #[error("Platform error: {0}")]
    Platform(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AlmacenError {
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

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by user input rather than infrastructure.
    ///
    /// Validation errors are answered to the acting user only and never
    /// leave any state mutated.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidAmount(_)
                | Self::InvalidPrice(_)
                | Self::InvalidAction(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AlmacenError {
    fn from(err: std::io::Error) -> Self {
        Self::DataAccess(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for AlmacenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AlmacenError>`.
pub type Result<T> = std::result::Result<T, AlmacenError>;
