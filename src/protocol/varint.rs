//! Variable-length integers
//!
//! Unsigned values are written 7 bits at a time, least significant group
//! first. The high bit of each byte is set when another byte follows.
//!
//! ```text
//!   300 = 0b1_0010_1100  ->  [1010_1100] [0000_0010]
//! ```

use std::io::Read;

use bytes::BufMut;

use crate::error::{HotRodError, Result};

/// Longest encoding of a `u64` (ceil(64 / 7))
pub const MAX_VINT_LEN: usize = 10;

const PAYLOAD_MASK: u8 = 0x7F;
const CONTINUATION: u8 = 0x80;

/// Append the encoding of `value` to `buf`
pub fn write_vint<B: BufMut>(buf: &mut B, mut value: u64) {
    while value >= u64::from(CONTINUATION) {
        buf.put_u8((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Encode `value` into a fresh buffer
pub fn encode_vint(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    write_vint(&mut buf, value);
    buf
}

/// Number of bytes `write_vint` produces for `value`
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Read one varint, consuming exactly the bytes that encode it
pub fn read_vint<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;

    loop {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;
        let group = u64::from(byte[0] & PAYLOAD_MASK);

        if shift >= 64 || (shift == 63 && group > 1) {
            return Err(HotRodError::Protocol(
                "varint overflows 64 bits".to_string(),
            ));
        }
        value |= group << shift;

        if byte[0] & CONTINUATION == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// Read a varint used as a length prefix, bounded by `max`
pub fn read_len<R: Read + ?Sized>(reader: &mut R, max: usize) -> Result<usize> {
    let len = read_vint(reader)?;
    if len > max as u64 {
        return Err(HotRodError::Protocol(format!(
            "Field too large: {} bytes (max {})",
            len, max
        )));
    }
    Ok(len as usize)
}
