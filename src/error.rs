//! Error types for the Hot Rod client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using HotRodError
pub type Result<T> = std::result::Result<T, HotRodError>;

/// Unified error type for Hot Rod client operations
///
/// A non-success status byte in a response is not an error: it surfaces as
/// `false` or an absent value from the cache handle.
#[derive(Debug, Error)]
pub enum HotRodError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Dispatch Errors (raised before any I/O)
    // -------------------------------------------------------------------------
    #[error("Unsupported operation: 0x{0:02x}")]
    UnsupportedOperation(u8),

    #[error("Missing {field} for operation {op}")]
    MissingField { op: &'static str, field: &'static str },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
