//! Network Module
//!
//! Byte-stream transport for the client.
//!
//! ## Model
//! - One connection per operation, opened after the request is validated
//! - No pooling, no reuse; dropping the connection closes it

mod connection;
mod transport;

pub use connection::Connection;
pub use transport::{TcpTransport, Transport};
