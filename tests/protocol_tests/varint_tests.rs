//! Varint Tests
//!
//! Tests for the 7-bit variable-length integer codec.

use std::io::Cursor;

use hotrod::protocol::varint::{encode_vint, encoded_len, read_len, read_vint, MAX_VINT_LEN};
use hotrod::HotRodError;

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_boundary_lengths() {
    let cases: [(u64, usize); 5] = [(0, 1), (127, 1), (128, 2), (16383, 2), (16384, 3)];

    for (value, expected_len) in cases {
        let encoded = encode_vint(value);
        assert_eq!(encoded.len(), expected_len, "length of {}", value);
        assert_eq!(encoded_len(value), expected_len, "encoded_len of {}", value);

        let decoded = read_vint(&mut Cursor::new(&encoded)).unwrap();
        assert_eq!(decoded, value);
    }
}

#[test]
fn test_known_encodings() {
    assert_eq!(encode_vint(0), vec![0x00]);
    assert_eq!(encode_vint(1), vec![0x01]);
    assert_eq!(encode_vint(127), vec![0x7F]);
    assert_eq!(encode_vint(128), vec![0x80, 0x01]);
    assert_eq!(encode_vint(300), vec![0xAC, 0x02]);
    assert_eq!(encode_vint(16384), vec![0x80, 0x80, 0x01]);
}

#[test]
fn test_max_value() {
    let encoded = encode_vint(u64::MAX);
    assert_eq!(encoded.len(), MAX_VINT_LEN);
    assert_eq!(*encoded.last().unwrap(), 0x01);
    assert_eq!(read_vint(&mut Cursor::new(&encoded)).unwrap(), u64::MAX);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_consumes_exactly_its_bytes() {
    let mut bytes = encode_vint(16384);
    bytes.extend_from_slice(&encode_vint(5));
    bytes.push(0xEE);

    let mut cursor = Cursor::new(bytes);
    assert_eq!(read_vint(&mut cursor).unwrap(), 16384);
    assert_eq!(cursor.position(), 3);
    assert_eq!(read_vint(&mut cursor).unwrap(), 5);
    assert_eq!(cursor.position(), 4);
}

#[test]
fn test_truncated_varint_is_io_error() {
    let mut cursor = Cursor::new(vec![0x80, 0x80]);
    let result = read_vint(&mut cursor);
    assert!(matches!(
        result,
        Err(HotRodError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
    ));
}

#[test]
fn test_overlong_varint_is_protocol_error() {
    let mut bytes = vec![0xFF; MAX_VINT_LEN];
    bytes.push(0x01);
    let result = read_vint(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(HotRodError::Protocol(_))));
}

#[test]
fn test_overflowing_last_group_is_protocol_error() {
    // Ten groups where the last carries more than the single remaining bit
    let mut bytes = vec![0xFF; MAX_VINT_LEN - 1];
    bytes.push(0x02);
    let result = read_vint(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(HotRodError::Protocol(_))));
}

#[test]
fn test_read_len_enforces_ceiling() {
    let bytes = encode_vint(1025);
    assert_eq!(read_len(&mut Cursor::new(&bytes), 2048).unwrap(), 1025);

    let result = read_len(&mut Cursor::new(&bytes), 1024);
    assert!(result.unwrap_err().to_string().contains("Field too large"));
}

#[test]
fn test_round_trip_powers_of_two() {
    for shift in 0..64 {
        for value in [(1u64 << shift) - 1, 1u64 << shift] {
            let encoded = encode_vint(value);
            assert_eq!(encoded.len(), encoded_len(value));
            assert_eq!(read_vint(&mut Cursor::new(&encoded)).unwrap(), value);
        }
    }
}
