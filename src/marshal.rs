//! Value marshalling
//!
//! Turns application keys and values into the byte strings carried on the
//! wire. Client and server-side readers must agree on the format.
//!
//! An empty body on the wire means "absent", so a marshaller must never
//! produce zero bytes for a real value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{HotRodError, Result};

/// Converts values to and from their wire bytes
pub trait Marshaller {
    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Bincode (1.x, default options) marshaller
///
/// Output is a one-byte format tag followed by the bincode payload.
/// ```text
/// ┌──────────┬──────────────────────────┐
/// │ Tag (1)  │ bincode payload (0..n)   │
/// └──────────┴──────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeMarshaller;

impl BincodeMarshaller {
    /// Leading byte of every bincode-marshalled value
    pub const FORMAT_TAG: u8 = 0xB1;
}

impl Marshaller for BincodeMarshaller {
    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let size = bincode::serialized_size(value)
            .map_err(|e| HotRodError::Serialization(e.to_string()))?;

        let mut bytes = Vec::with_capacity(1 + size as usize);
        bytes.push(Self::FORMAT_TAG);
        bincode::serialize_into(&mut bytes, value)
            .map_err(|e| HotRodError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match bytes.split_first() {
            Some((&Self::FORMAT_TAG, payload)) => bincode::deserialize(payload)
                .map_err(|e| HotRodError::Serialization(e.to_string())),
            Some((tag, _)) => Err(HotRodError::Serialization(format!(
                "Unknown format tag: 0x{:02x}",
                tag
            ))),
            None => Err(HotRodError::Serialization("Empty value".to_string())),
        }
    }
}
