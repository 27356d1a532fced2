//! Operation codes
//!
//! Request op-codes of Hot Rod protocol version 1.0.

use crate::error::HotRodError;

/// Request operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Put = 0x01,
    Get = 0x03,
    PutIfAbsent = 0x05,
    Replace = 0x07,
    ReplaceIfUnmodified = 0x09,
    Remove = 0x0B,
    RemoveIfUnmodified = 0x0D,
    ContainsKey = 0x0F,
    GetWithVersion = 0x11,
    Clear = 0x13,
    Stats = 0x15,
    Ping = 0x17,
    BulkGet = 0x19,
}

impl OpCode {
    /// Every op-code the protocol defines
    pub const ALL: [OpCode; 13] = [
        OpCode::Put,
        OpCode::Get,
        OpCode::PutIfAbsent,
        OpCode::Replace,
        OpCode::ReplaceIfUnmodified,
        OpCode::Remove,
        OpCode::RemoveIfUnmodified,
        OpCode::ContainsKey,
        OpCode::GetWithVersion,
        OpCode::Clear,
        OpCode::Stats,
        OpCode::Ping,
        OpCode::BulkGet,
    ];

    /// The wire byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The op-code the server answers with (request code + 1)
    pub fn response_code(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Put => "put",
            OpCode::Get => "get",
            OpCode::PutIfAbsent => "put_if_absent",
            OpCode::Replace => "replace",
            OpCode::ReplaceIfUnmodified => "replace_if_unmodified",
            OpCode::Remove => "remove",
            OpCode::RemoveIfUnmodified => "remove_if_unmodified",
            OpCode::ContainsKey => "contains_key",
            OpCode::GetWithVersion => "get_with_version",
            OpCode::Clear => "clear",
            OpCode::Stats => "stats",
            OpCode::Ping => "ping",
            OpCode::BulkGet => "bulk_get",
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = HotRodError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::ALL
            .into_iter()
            .find(|op| op.as_u8() == byte)
            .ok_or(HotRodError::UnsupportedOperation(byte))
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
