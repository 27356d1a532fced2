//! Request and response headers
//!
//! ## Request Header (Hot Rod 1.0)
//! ```text
//! ┌───────────┬─────────────┬─────────┬────────┬──────────────────┬───────────┬──────────────┬─────────────┬─────────┐
//! │ Magic (1) │ MsgId vlong │ Ver (1) │ Op (1) │ NameLen vint+Name│ Flags vint│ Intellig (1) │ TopoId vint │ Txn (1) │
//! └───────────┴─────────────┴─────────┴────────┴──────────────────┴───────────┴──────────────┴─────────────┴─────────┘
//! ```
//!
//! ## Response Header
//! ```text
//! ┌──────────────────────┬────────────┬──────────────────────┐
//! │ Opaque (2)           │ Status (1) │ Opaque (2)           │
//! └──────────────────────┴────────────┴──────────────────────┘
//! ```

use bytes::BufMut;

use super::varint::write_vint;
use super::OpCode;

/// First byte of every request
pub const REQUEST_MAGIC: u8 = 0xA0;

/// First byte of every response
pub const RESPONSE_MAGIC: u8 = 0xA1;

/// Protocol version 1.0
pub const PROTOCOL_VERSION: u8 = 10;

/// Client intelligence: basic (no topology or hash awareness)
pub const CLIENT_INTELLIGENCE_BASIC: u8 = 0x01;

/// Transaction type: non-transactional
pub const NO_TRANSACTION: u8 = 0x00;

/// Fixed size of a response header
pub const RESPONSE_HEADER_SIZE: usize = 5;

/// Position of the status byte within the response header
pub const STATUS_OFFSET: usize = 2;

/// Status byte of a successful operation
pub const SUCCESS: u8 = 0x00;

/// Status byte when a conditional operation was not executed
pub const NOT_EXECUTED: u8 = 0x01;

/// Status byte when the key does not exist
pub const KEY_DOES_NOT_EXIST: u8 = 0x02;

/// Append the request header for `op` against `cache_name`
///
/// Message id and topology id are always zero, so the output depends only on
/// the two arguments.
pub fn write_header<B: BufMut>(buf: &mut B, op: OpCode, cache_name: &str) {
    buf.put_u8(REQUEST_MAGIC);
    write_vint(buf, 0); // message id
    buf.put_u8(PROTOCOL_VERSION);
    buf.put_u8(op.as_u8());
    write_vint(buf, cache_name.len() as u64);
    buf.put_slice(cache_name.as_bytes());
    write_vint(buf, 0); // flags
    buf.put_u8(CLIENT_INTELLIGENCE_BASIC);
    write_vint(buf, 0); // topology id
    buf.put_u8(NO_TRANSACTION);
}

/// Build the request header for `op` against `cache_name`
pub fn build_header(op: OpCode, cache_name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + cache_name.len());
    write_header(&mut buf, op, cache_name);
    buf
}

/// A received response header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader([u8; RESPONSE_HEADER_SIZE]);

impl ResponseHeader {
    pub fn new(bytes: [u8; RESPONSE_HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw status byte
    pub fn status(&self) -> u8 {
        self.0[STATUS_OFFSET]
    }

    /// True only when the status byte is SUCCESS
    pub fn is_success(&self) -> bool {
        self.status() == SUCCESS
    }
}
