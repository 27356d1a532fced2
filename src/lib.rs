//! # hotrod
//!
//! A synchronous client for the Hot Rod binary cache protocol:
//! - Typed request encoding for every supported cache operation
//! - Varint-prefixed fields and a streamed bulk-get reply
//! - One blocking TCP round trip per call, no shared mutable state
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      RemoteCache                             │
//! │        (host, port, name) + marshaller for keys/values       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Envelope
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                               │
//! │        Envelope → Operation → request ─▶ reply → Reply       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │   (codec)   │          │ (1 conn/op) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hotrod::RemoteCache;
//!
//! let cache = RemoteCache::new("127.0.0.1", 11222, "")?;
//! cache.put("greeting", "hello")?;
//! let value: Option<String> = cache.get("greeting")?;
//! assert_eq!(value.as_deref(), Some("hello"));
//! # Ok::<(), hotrod::HotRodError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod marshal;
pub mod network;
pub mod dispatcher;
pub mod cache;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HotRodError, Result};
pub use config::ClientConfig;
pub use cache::{RemoteCache, Versioned};
pub use dispatcher::Dispatcher;
pub use marshal::{BincodeMarshaller, Marshaller};
pub use protocol::{OpCode, Version};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
