//! Error taxonomy shared by both storage backends.
//!
//! Not-found is never an error here: reads return `Option` and deletes
//! return `bool`. Every variant below is a genuine failure that
//! propagates to the caller; only the system-log write path is allowed
//! to swallow one.

use thiserror::Error;

/// Failures surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required remote credentials are unset. Raised before any network
    /// call is attempted.
    #[error("remote store not configured: {0}")]
    Configuration(String),

    /// Constraint violation, connectivity loss, or transaction failure
    /// in the local relational store. The failing operation has already
    /// rolled back by the time this is returned.
    #[error("local store {operation} failed: {message}")]
    Local {
        operation: &'static str,
        message: String,
    },

    /// Non-success HTTP status from the remote table-store.
    #[error("remote store returned status {status}: {message}")]
    Remote { status: u16, message: String },

    /// The remote call itself failed: timeout, DNS, connection reset,
    /// or an unreadable response body.
    #[error("remote store request failed: {0}")]
    RemoteTransport(String),
}

impl StoreError {
    /// Wrap a local-engine failure with the operation that raised it.
    pub fn local(operation: &'static str, source: impl std::fmt::Display) -> Self {
        StoreError::Local {
            operation,
            message: source.to_string(),
        }
    }
}
