//! Remote Cache Handle
//!
//! The user-facing handle for one named cache on one server. Every method is
//! an independent, blocking round trip; nothing is retried or pooled.

use std::collections::HashMap;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{HotRodError, Result};
use crate::marshal::{BincodeMarshaller, Marshaller};
use crate::network::{TcpTransport, Transport};
use crate::protocol::{Envelope, OpCode, Reply, Version};

/// A value read together with its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<V> {
    pub version: Version,

    /// `None` when the server returned an empty body
    pub value: Option<V>,
}

/// Handle to a remote cache
///
/// Holds only its immutable configuration, so it can be shared between
/// threads when the transport and marshaller allow it.
pub struct RemoteCache<T = TcpTransport, M = BincodeMarshaller> {
    config: ClientConfig,
    dispatcher: Dispatcher<T>,
    marshaller: M,
}

impl RemoteCache {
    /// Handle to cache `name` at `host:port` ("" for the default cache)
    pub fn new(host: impl Into<String>, port: u16, name: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder()
            .host(host)
            .port(port)
            .cache_name(name)
            .build()?;
        Ok(Self::with_config(config))
    }

    /// Handle using plain TCP and bincode
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = TcpTransport::from_config(&config);
        Self::with_transport(config, transport, BincodeMarshaller)
    }
}

impl<T: Transport, M: Marshaller> RemoteCache<T, M> {
    /// Handle with a custom transport and marshaller
    pub fn with_transport(config: ClientConfig, transport: T, marshaller: M) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(transport),
            marshaller,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn name(&self) -> &str {
        &self.config.cache_name
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Check that the server answers
    pub fn ping(&self) -> Result<bool> {
        self.status(Envelope::new(OpCode::Ping))
    }

    /// Remove every entry of the cache
    pub fn clear(&self) -> Result<bool> {
        self.status(Envelope::new(OpCode::Clear))
    }

    /// Get the value stored under `key`
    pub fn get<K, V>(&self, key: &K) -> Result<Option<V>>
    where
        K: Serialize + ?Sized,
        V: DeserializeOwned,
    {
        let envelope = Envelope::new(OpCode::Get).key(self.marshaller.marshal(key)?);
        match self.dispatch(envelope)? {
            Reply::Value(body) => self.unmarshal_body(&body),
            other => Err(unexpected(OpCode::Get, &other)),
        }
    }

    /// Fetch a server-chosen batch of entries
    ///
    /// `count` = 0 lets the server pick the batch size. When a key appears
    /// more than once in the stream, the last value wins.
    pub fn get_bulk<K, V>(&self, count: u32) -> Result<HashMap<K, V>>
    where
        K: DeserializeOwned + Eq + Hash,
        V: DeserializeOwned,
    {
        let envelope = Envelope::new(OpCode::BulkGet).count(count);
        match self.dispatch(envelope)? {
            Reply::Bulk(entries) => entries
                .iter()
                .map(|(key, value)| -> Result<(K, V)> {
                    Ok((self.marshaller.unmarshal(key)?, self.marshaller.unmarshal(value)?))
                })
                .collect(),
            other => Err(unexpected(OpCode::BulkGet, &other)),
        }
    }

    /// Store `value` under `key`
    pub fn put<K, V>(&self, key: &K, value: &V) -> Result<bool>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.status(self.key_value(OpCode::Put, key, value)?)
    }

    /// Store `value` under `key` only if the key is absent
    pub fn put_if_absent<K, V>(&self, key: &K, value: &V) -> Result<bool>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.status(self.key_value(OpCode::PutIfAbsent, key, value)?)
    }

    /// Get the value stored under `key` together with its version
    pub fn get_versioned<K, V>(&self, key: &K) -> Result<Versioned<V>>
    where
        K: Serialize + ?Sized,
        V: DeserializeOwned,
    {
        let envelope = Envelope::new(OpCode::GetWithVersion).key(self.marshaller.marshal(key)?);
        match self.dispatch(envelope)? {
            Reply::Versioned { version, value } => Ok(Versioned {
                version,
                value: self.unmarshal_body(&value)?,
            }),
            other => Err(unexpected(OpCode::GetWithVersion, &other)),
        }
    }

    /// Whether `key` is present
    pub fn contains_key<K: Serialize + ?Sized>(&self, key: &K) -> Result<bool> {
        self.status(Envelope::new(OpCode::ContainsKey).key(self.marshaller.marshal(key)?))
    }

    /// Remove `key`
    pub fn remove<K: Serialize + ?Sized>(&self, key: &K) -> Result<bool> {
        self.status(Envelope::new(OpCode::Remove).key(self.marshaller.marshal(key)?))
    }

    /// Remove `key` only if its version is still `version`
    pub fn remove_if_unmodified<K: Serialize + ?Sized>(
        &self,
        key: &K,
        version: Version,
    ) -> Result<bool> {
        let envelope = Envelope::new(OpCode::RemoveIfUnmodified)
            .key(self.marshaller.marshal(key)?)
            .version(version);
        self.status(envelope)
    }

    /// Replace the value under `key` only if the key is present
    pub fn replace<K, V>(&self, key: &K, value: &V) -> Result<bool>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.status(self.key_value(OpCode::Replace, key, value)?)
    }

    /// Replace the value under `key` only if its version is still `version`
    pub fn replace_if_unmodified<K, V>(&self, key: &K, version: Version, value: &V) -> Result<bool>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        let envelope = self
            .key_value(OpCode::ReplaceIfUnmodified, key, value)?
            .version(version);
        self.status(envelope)
    }

    /// Run a raw envelope through the dispatcher
    pub fn dispatch(&self, envelope: Envelope) -> Result<Reply> {
        self.dispatcher.dispatch(&self.config, envelope)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn status(&self, envelope: Envelope) -> Result<bool> {
        let op = envelope.op;
        match self.dispatch(envelope)? {
            Reply::Status(success) => Ok(success),
            other => Err(unexpected(op, &other)),
        }
    }

    fn key_value<K, V>(&self, op: OpCode, key: &K, value: &V) -> Result<Envelope>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        Ok(Envelope::new(op)
            .key(self.marshaller.marshal(key)?)
            .value(self.marshaller.marshal(value)?))
    }

    /// An empty body is an absent value and is never unmarshalled
    fn unmarshal_body<V: DeserializeOwned>(&self, body: &[u8]) -> Result<Option<V>> {
        if body.is_empty() {
            return Ok(None);
        }
        self.marshaller.unmarshal(body).map(Some)
    }
}

fn unexpected(op: OpCode, reply: &Reply) -> HotRodError {
    HotRodError::Protocol(format!("{} produced a {} reply", op, reply.kind()))
}
