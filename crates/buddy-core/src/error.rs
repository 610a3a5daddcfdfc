//! Error types for the Buddy SDK.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::HydrationError;
use crate::service_code::ServiceCode;
use crate::transport::WireError;

/// A shared error type for every Buddy operation.
///
/// Each variant corresponds to one fault kind: validation faults are produced
/// locally before any network call, everything else arrives through the
/// transport and the result adapter.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuddyError {
    /// A caller-supplied argument was rejected before any request was issued.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Network or transport level failure (timeout, connectivity, bad body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with an error code.
    #[error("Service error from {method}: {code}")]
    Service { code: ServiceCode, method: String },

    /// A wire record could not be turned into a domain entity.
    #[error("Hydration error on field '{field}': {message}")]
    Hydration { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl BuddyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Service error for the given remote method
    pub fn service(code: ServiceCode, method: impl Into<String>) -> Self {
        Self::Service {
            code,
            method: method.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Attaches the remote method name to a raw wire failure.
    pub fn from_wire(err: WireError, method: &str) -> Self {
        match err {
            WireError::Transport(message) => Self::Transport(message),
            WireError::Service(code) => Self::service(code, method),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation fault
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a transport fault
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a hydration fault
    pub fn is_hydration(&self) -> bool {
        matches!(self, Self::Hydration { .. })
    }

    /// Check if this error carries the given remote service code.
    pub fn is_service_code(&self, expected: &str) -> bool {
        match self {
            Self::Service { code, .. } => code.as_str() == expected,
            _ => false,
        }
    }

    /// Returns the name of the rejected argument for validation faults.
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { name, .. } => Some(name),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<HydrationError> for BuddyError {
    fn from(err: HydrationError) -> Self {
        Self::Hydration {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<std::io::Error> for BuddyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BuddyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BuddyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BuddyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BuddyError>`.
pub type BuddyResult<T> = std::result::Result<T, BuddyError>;
