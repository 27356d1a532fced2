//! Protocol Module
//!
//! Wire codec for the Hot Rod binary cache protocol (version 1.0).
//!
//! ## Exchange
//! Every operation is exactly one request followed by exactly one reply:
//! ```text
//! client ── request header ─ request body ─────────────▶ server
//! client ◀────────── response header (5) ─ reply body ── server
//! ```
//!
//! Variable-size fields are prefixed with a varint length. Keys and values
//! travel as marshalled bytes; this module never looks inside them.
//!
//! ### Status Codes
//! - 0x00: SUCCESS
//! - anything else: not successful (e.g. 0x01 not executed, 0x02 key absent)

mod opcode;
mod request;
mod response;
mod codec;
pub mod header;
pub mod varint;

pub use opcode::OpCode;
pub use request::{Envelope, Operation, ReplyKind, Version, VERSION_SIZE};
pub use response::Reply;
pub use header::{build_header, ResponseHeader, RESPONSE_HEADER_SIZE, SUCCESS};
pub use codec::{encode_request, write_request, read_response_header, read_reply, BulkEntries};
