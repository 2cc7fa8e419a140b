//! Error types for the planweave engine.
//!
//! Reconciliation itself never fails with an error: operator-facing
//! problems accumulate as diagnostics and the pass always completes. The
//! errors here cover the contracts around the pass instead: schema
//! registration and the private-state namespace/wire gates.

use thiserror::Error;

/// The main error type for the planweave engine.
#[derive(Debug, Error)]
pub enum PlanweaveError {
    /// Schema registration errors.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Private state errors.
    #[error("Private state error: {0}")]
    PrivateState(#[from] PrivateStateError),
}

/// Errors detected when a schema is validated at registration time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No behavior flag was set on an attribute.
    #[error("Attribute {path} must be required, optional, or computed")]
    MissingFlags {
        /// Path of the offending attribute.
        path: String,
    },

    /// Conflicting behavior flags were set on an attribute.
    #[error("Attribute {path} has conflicting flags: {reason}")]
    ConflictingFlags {
        /// Path of the offending attribute.
        path: String,
        /// Description of the conflict.
        reason: String,
    },
}

/// Errors from the private-state store.
#[derive(Debug, Error)]
pub enum PrivateStateError {
    /// A provider-supplied modifier wrote to the framework namespace.
    #[error("Private state key {key:?} is in the framework-reserved namespace")]
    ReservedKey {
        /// The rejected key.
        key: String,
    },

    /// An empty key was supplied.
    #[error("Private state keys must not be empty")]
    EmptyKey,

    /// The stored blob could not be decoded or encoded.
    #[error("Private state blob is malformed: {message}")]
    Malformed {
        /// Description of the codec failure.
        message: String,
    },
}

/// Result type alias for planweave operations.
pub type Result<T> = std::result::Result<T, PlanweaveError>;

impl SchemaError {
    /// Creates a conflicting-flags error.
    #[must_use]
    pub fn conflicting(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConflictingFlags {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
