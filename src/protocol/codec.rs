//! Protocol codec
//!
//! Encoding of requests and decoding of replies.
//!
//! ## Request Body by Operation (after the request header)
//! - PING, CLEAR:               empty
//! - BULK_GET:                  vint(count)
//! - GET, GET_WITH_VERSION,
//!   REMOVE, CONTAINS_KEY:      vint(key_len) + key
//! - PUT, PUT_IF_ABSENT,
//!   REPLACE:                   vint(key_len) + key + 0x00 0x00 + vint(value_len) + value
//! - REMOVE_IF_UNMODIFIED:      vint(key_len) + key + version (8)
//! - REPLACE_IF_UNMODIFIED:     vint(key_len) + key + 0x00 0x00 + version (8)
//!                              + vint(value_len) + value
//!
//! The two `0x00` bytes stand for lifespan and max-idle, which are not
//! supported and always sent as zero.
//!
//! ## Reply Body by Kind (after the 5-byte response header)
//! - Basic:     empty
//! - Value:     vint(len) + value
//! - Versioned: version (8) + vint(len) + value
//! - Bulk:      { more (1) = 1, vint(key_len) + key, vint(value_len) + value }*
//!              more (1) != 1

use std::io::{Read, Write};

use bytes::{BufMut, BytesMut};

use crate::error::Result;
use super::header::{write_header, ResponseHeader, RESPONSE_HEADER_SIZE};
use super::varint::{read_len, write_vint};
use super::{Operation, Reply, ReplyKind, Version, VERSION_SIZE};

/// Lifespan and max-idle placeholders
const RESERVED_EXPIRATION: [u8; 2] = [0x00, 0x00];

/// "More" flag value announcing another bulk entry
const MORE_ENTRIES: u8 = 1;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode `operation` against `cache_name` into a complete request
pub fn encode_request(operation: &Operation, cache_name: &str) -> BytesMut {
    let mut buf = BytesMut::with_capacity(64);
    write_header(&mut buf, operation.op_code(), cache_name);

    match operation {
        Operation::Ping | Operation::Clear => {}
        Operation::BulkGet { count } => {
            write_vint(&mut buf, u64::from(*count));
        }
        Operation::Get { key }
        | Operation::GetWithVersion { key }
        | Operation::Remove { key }
        | Operation::ContainsKey { key } => {
            write_field(&mut buf, key);
        }
        Operation::Put { key, value }
        | Operation::PutIfAbsent { key, value }
        | Operation::Replace { key, value } => {
            write_field(&mut buf, key);
            buf.put_slice(&RESERVED_EXPIRATION);
            write_field(&mut buf, value);
        }
        Operation::RemoveIfUnmodified { key, version } => {
            write_field(&mut buf, key);
            buf.put_slice(version.as_bytes());
        }
        Operation::ReplaceIfUnmodified {
            key,
            version,
            value,
        } => {
            write_field(&mut buf, key);
            buf.put_slice(&RESERVED_EXPIRATION);
            buf.put_slice(version.as_bytes());
            write_field(&mut buf, value);
        }
    }

    buf
}

/// Write a complete request to a stream
pub fn write_request<W: Write>(
    writer: &mut W,
    operation: &Operation,
    cache_name: &str,
) -> Result<()> {
    let bytes = encode_request(operation, cache_name);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Length-prefixed field
fn write_field(buf: &mut BytesMut, bytes: &[u8]) {
    write_vint(buf, bytes.len() as u64);
    buf.put_slice(bytes);
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Read the fixed response header
pub fn read_response_header<R: Read>(reader: &mut R) -> Result<ResponseHeader> {
    let mut header = [0u8; RESPONSE_HEADER_SIZE];
    reader.read_exact(&mut header)?;
    Ok(ResponseHeader::new(header))
}

/// Read a complete reply of the given kind from a stream
///
/// `max_field` bounds every length prefix read from the stream.
pub fn read_reply<R: Read>(reader: &mut R, kind: ReplyKind, max_field: usize) -> Result<Reply> {
    let header = read_response_header(reader)?;

    let reply = match kind {
        ReplyKind::Basic => Reply::Status(header.is_success()),
        ReplyKind::Value => Reply::Value(read_field(reader, max_field)?),
        ReplyKind::Versioned => {
            let mut version = [0u8; VERSION_SIZE];
            reader.read_exact(&mut version)?;
            Reply::Versioned {
                version: Version::from_bytes(version),
                value: read_field(reader, max_field)?,
            }
        }
        ReplyKind::Bulk => {
            let entries = BulkEntries::new(reader, max_field).collect::<Result<Vec<_>>>()?;
            Reply::Bulk(entries)
        }
    };

    Ok(reply)
}

/// Length-prefixed field
fn read_field<R: Read + ?Sized>(reader: &mut R, max_field: usize) -> Result<Vec<u8>> {
    let len = read_len(reader, max_field)?;
    let mut body = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut body)?;
    }
    Ok(body)
}

// =============================================================================
// Bulk Stream
// =============================================================================

/// Iterator over the entries of a bulk-get reply body
///
/// Ends at the first "more" byte that is not 1, or after the first error.
/// Once ended it never reads again.
pub struct BulkEntries<'a, R: Read> {
    reader: &'a mut R,
    max_field: usize,
    done: bool,
}

impl<'a, R: Read> BulkEntries<'a, R> {
    /// Start reading entries; the response header must already be consumed
    pub fn new(reader: &'a mut R, max_field: usize) -> Self {
        Self {
            reader,
            max_field,
            done: false,
        }
    }

    fn next_entry(&mut self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        let mut more = [0u8; 1];
        self.reader.read_exact(&mut more)?;
        if more[0] != MORE_ENTRIES {
            return Ok(None);
        }

        let key = read_field(&mut *self.reader, self.max_field)?;
        let value = read_field(&mut *self.reader, self.max_field)?;
        Ok(Some((key, value)))
    }
}

impl<R: Read> Iterator for BulkEntries<'_, R> {
    type Item = Result<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for BulkEntries<'_, R> {}
