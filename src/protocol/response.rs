//! Response definitions
//!
//! Decoded replies. Values are still marshalled bytes.

use super::Version;

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Whether the status byte was SUCCESS
    Status(bool),

    /// Value body (empty means the key is absent)
    Value(Vec<u8>),

    /// Version token and value body (empty means absent)
    Versioned { version: Version, value: Vec<u8> },

    /// Key/value bodies in the order the server streamed them
    Bulk(Vec<(Vec<u8>, Vec<u8>)>),
}

impl Reply {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Value(_) => "value",
            Reply::Versioned { .. } => "versioned",
            Reply::Bulk(_) => "bulk",
        }
    }
}
