//! Dispatcher Tests
//!
//! Tests for the one-connection-per-call exchange, driven by stub transports.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashMap;

use common::{response_header, stub_config, ScriptedTransport, UntouchableTransport};
use hotrod::marshal::{BincodeMarshaller, Marshaller};
use hotrod::protocol::header::SUCCESS;
use hotrod::protocol::varint::encode_vint;
use hotrod::protocol::{build_header, encode_request, Envelope, Operation, Reply, Version};
use hotrod::{Dispatcher, HotRodError, OpCode, RemoteCache};

fn field(bytes: &[u8]) -> Vec<u8> {
    let mut out = encode_vint(bytes.len() as u64);
    out.extend_from_slice(bytes);
    out
}

fn scripted_cache(reply: Vec<u8>) -> (RemoteCache<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::new(reply);
    let cache = RemoteCache::with_transport(stub_config(""), transport.clone(), BincodeMarshaller);
    (cache, transport)
}

// =============================================================================
// Validation Before I/O
// =============================================================================

#[test]
fn test_unsupported_operation_performs_no_io() {
    let dispatcher = Dispatcher::new(UntouchableTransport);
    let result = dispatcher.dispatch(&stub_config(""), Envelope::new(OpCode::Stats));
    assert!(matches!(result, Err(HotRodError::UnsupportedOperation(0x15))));
}

#[test]
fn test_missing_key_performs_no_io() {
    let dispatcher = Dispatcher::new(UntouchableTransport);
    for op in [OpCode::Get, OpCode::Put, OpCode::ReplaceIfUnmodified, OpCode::ContainsKey] {
        let result = dispatcher.dispatch(&stub_config(""), Envelope::new(op));
        assert!(matches!(result, Err(HotRodError::MissingField { .. })), "{}", op);
    }
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_ping_writes_header_only() {
    let transport = ScriptedTransport::new(response_header(SUCCESS));
    let dispatcher = Dispatcher::new(transport.clone());

    let reply = dispatcher
        .dispatch(&stub_config("users"), Envelope::new(OpCode::Ping))
        .unwrap();

    assert_eq!(reply, Reply::Status(true));
    assert_eq!(transport.written(), build_header(OpCode::Ping, "users"));
    assert_eq!(transport.opened(), 1);
    assert_eq!(transport.closed(), 1);
}

#[test]
fn test_put_writes_marshalled_key_and_value() {
    let (cache, transport) = scripted_cache(response_header(SUCCESS));
    assert!(cache.put("a", "1").unwrap());

    let marshaller = BincodeMarshaller;
    let expected = encode_request(
        &Operation::Put {
            key: marshaller.marshal("a").unwrap(),
            value: marshaller.marshal("1").unwrap(),
        },
        "",
    );
    assert_eq!(transport.written(), expected.to_vec());
}

#[test]
fn test_connection_closed_when_decode_fails() {
    // Header promises a 10-byte value but the stream ends after 3
    let mut reply = response_header(SUCCESS);
    reply.extend_from_slice(&encode_vint(10));
    reply.extend_from_slice(b"abc");
    let (cache, transport) = scripted_cache(reply);

    let result = cache.get::<str, String>("k");
    assert!(matches!(result, Err(HotRodError::Io(_))));
    assert_eq!(transport.opened(), 1);
    assert_eq!(transport.closed(), 1);
}

#[test]
fn test_each_call_uses_its_own_connection() {
    let (cache, transport) = scripted_cache(response_header(SUCCESS));
    for _ in 0..3 {
        assert!(cache.ping().unwrap());
    }
    assert_eq!(transport.opened(), 3);
    assert_eq!(transport.closed(), 3);
}

// =============================================================================
// Reply Mapping Through the Handle
// =============================================================================

#[test]
fn test_status_mapping_for_every_byte() {
    for status in 0..=u8::MAX {
        let (cache, _) = scripted_cache(response_header(status));
        assert_eq!(cache.contains_key("k").unwrap(), status == SUCCESS, "status 0x{:02x}", status);
    }
}

#[test]
fn test_empty_body_is_absent() {
    let mut reply = response_header(0x02);
    reply.push(0x00);
    let (cache, _) = scripted_cache(reply);
    assert_eq!(cache.get::<str, String>("missing").unwrap(), None);
}

#[test]
fn test_versioned_reply() {
    let marshaller = BincodeMarshaller;
    let mut reply = response_header(SUCCESS);
    reply.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 0]);
    reply.extend_from_slice(&field(&marshaller.marshal("1").unwrap()));
    let (cache, _) = scripted_cache(reply);

    let versioned = cache.get_versioned::<str, String>("a").unwrap();
    assert_eq!(versioned.version, Version::from_bytes([0, 0, 0, 0, 0, 0, 1, 0]));
    assert_eq!(versioned.value.as_deref(), Some("1"));
}

#[test]
fn test_bulk_later_duplicates_overwrite() {
    let marshaller = BincodeMarshaller;
    let mut reply = response_header(SUCCESS);
    for (key, value) in [("a", "1"), ("b", "2"), ("a", "3")] {
        reply.push(1);
        reply.extend_from_slice(&field(&marshaller.marshal(key).unwrap()));
        reply.extend_from_slice(&field(&marshaller.marshal(value).unwrap()));
    }
    reply.push(0);
    let (cache, transport) = scripted_cache(reply);

    let entries: HashMap<String, String> = cache.get_bulk(0).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["a"], "3");
    assert_eq!(entries["b"], "2");

    // count=0 goes on the wire as-is
    let header = build_header(OpCode::BulkGet, "");
    assert_eq!(&transport.written()[header.len()..], &[0x00]);
}
