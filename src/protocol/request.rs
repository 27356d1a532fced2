//! Request definitions
//!
//! An `Envelope` carries whatever a caller supplied for one round trip. It is
//! checked into a typed `Operation` before any connection is opened.

use std::fmt;
use std::str::FromStr;

use crate::error::{HotRodError, Result};
use super::OpCode;

/// Length of a version token
pub const VERSION_SIZE: usize = 8;

/// Opaque entry version used for optimistic concurrency
///
/// Never interpreted by the client; only echoed back to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version([u8; VERSION_SIZE]);

impl Version {
    pub fn from_bytes(bytes: [u8; VERSION_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; VERSION_SIZE] {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = HotRodError;

    /// Parse 16 hex digits, as produced by `Display`
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != VERSION_SIZE * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HotRodError::Config(format!("invalid version token: {:?}", s)));
        }

        let mut bytes = [0u8; VERSION_SIZE];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks(2)) {
            *byte = (hex_digit(pair[0]) << 4) | hex_digit(pair[1]);
        }
        Ok(Self(bytes))
    }
}

/// Value of one ASCII hex digit (already validated)
fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Everything a single call may supply, keyed by op-code
///
/// Keys and values are already marshalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub op: OpCode,
    pub key: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
    pub version: Option<Version>,
    pub count: Option<u32>,
}

impl Envelope {
    pub fn new(op: OpCode) -> Self {
        Self {
            op,
            key: None,
            value: None,
            version: None,
            count: None,
        }
    }

    pub fn key(mut self, key: Vec<u8>) -> Self {
        self.key = Some(key);
        self
    }

    pub fn value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// A validated request, one variant per registered operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Ping,
    Clear,
    Get { key: Vec<u8> },
    GetWithVersion { key: Vec<u8> },
    BulkGet { count: u32 },
    Put { key: Vec<u8>, value: Vec<u8> },
    PutIfAbsent { key: Vec<u8>, value: Vec<u8> },
    Replace { key: Vec<u8>, value: Vec<u8> },
    ContainsKey { key: Vec<u8> },
    Remove { key: Vec<u8> },
    RemoveIfUnmodified { key: Vec<u8>, version: Version },
    ReplaceIfUnmodified { key: Vec<u8>, version: Version, value: Vec<u8> },
}

/// How the response to an operation is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Header only; status decides the outcome
    Basic,
    /// Header, then a length-prefixed value
    Value,
    /// Header, version token, then a length-prefixed value
    Versioned,
    /// Header, then a flag-terminated stream of entries
    Bulk,
}

impl Operation {
    pub fn op_code(&self) -> OpCode {
        match self {
            Operation::Ping => OpCode::Ping,
            Operation::Clear => OpCode::Clear,
            Operation::Get { .. } => OpCode::Get,
            Operation::GetWithVersion { .. } => OpCode::GetWithVersion,
            Operation::BulkGet { .. } => OpCode::BulkGet,
            Operation::Put { .. } => OpCode::Put,
            Operation::PutIfAbsent { .. } => OpCode::PutIfAbsent,
            Operation::Replace { .. } => OpCode::Replace,
            Operation::ContainsKey { .. } => OpCode::ContainsKey,
            Operation::Remove { .. } => OpCode::Remove,
            Operation::RemoveIfUnmodified { .. } => OpCode::RemoveIfUnmodified,
            Operation::ReplaceIfUnmodified { .. } => OpCode::ReplaceIfUnmodified,
        }
    }

    pub fn reply_kind(&self) -> ReplyKind {
        match self {
            Operation::Get { .. } => ReplyKind::Value,
            Operation::GetWithVersion { .. } => ReplyKind::Versioned,
            Operation::BulkGet { .. } => ReplyKind::Bulk,
            Operation::Ping
            | Operation::Clear
            | Operation::Put { .. }
            | Operation::PutIfAbsent { .. }
            | Operation::Replace { .. }
            | Operation::ContainsKey { .. }
            | Operation::Remove { .. }
            | Operation::RemoveIfUnmodified { .. }
            | Operation::ReplaceIfUnmodified { .. } => ReplyKind::Basic,
        }
    }
}

impl TryFrom<Envelope> for Operation {
    type Error = HotRodError;

    fn try_from(envelope: Envelope) -> Result<Self> {
        let Envelope {
            op,
            key,
            value,
            version,
            count,
        } = envelope;

        let missing = |field| HotRodError::MissingField {
            op: op.name(),
            field,
        };
        let require_key = || key.ok_or_else(|| missing("key"));

        let operation = match op {
            OpCode::Ping => Operation::Ping,
            OpCode::Clear => Operation::Clear,
            // A missing count asks for the server's default page size, same as 0
            OpCode::BulkGet => Operation::BulkGet {
                count: count.unwrap_or(0),
            },
            OpCode::Get => Operation::Get { key: require_key()? },
            OpCode::GetWithVersion => Operation::GetWithVersion { key: require_key()? },
            OpCode::ContainsKey => Operation::ContainsKey { key: require_key()? },
            OpCode::Remove => Operation::Remove { key: require_key()? },
            OpCode::Put => Operation::Put {
                key: require_key()?,
                value: value.ok_or_else(|| missing("value"))?,
            },
            OpCode::PutIfAbsent => Operation::PutIfAbsent {
                key: require_key()?,
                value: value.ok_or_else(|| missing("value"))?,
            },
            OpCode::Replace => Operation::Replace {
                key: require_key()?,
                value: value.ok_or_else(|| missing("value"))?,
            },
            OpCode::RemoveIfUnmodified => Operation::RemoveIfUnmodified {
                key: require_key()?,
                version: version.ok_or_else(|| missing("version"))?,
            },
            OpCode::ReplaceIfUnmodified => Operation::ReplaceIfUnmodified {
                key: require_key()?,
                version: version.ok_or_else(|| missing("version"))?,
                value: value.ok_or_else(|| missing("value"))?,
            },
            OpCode::Stats => return Err(HotRodError::UnsupportedOperation(op.as_u8())),
        };

        Ok(operation)
    }
}
