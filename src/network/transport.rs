//! Transport
//!
//! Opens the byte stream a single operation runs over.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;
use super::Connection;

/// Source of connections to a server
///
/// Each opened connection serves one exchange and is released by dropping it.
pub trait Transport {
    type Conn: Read + Write;

    fn open(&self, host: &str, port: u16) -> Result<Self::Conn>;
}

/// Plain blocking TCP transport
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport {
    connect_timeout_ms: u64,
    read_timeout_ms: u64,
    write_timeout_ms: u64,
}

impl TcpTransport {
    /// Take timeouts from the client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            connect_timeout_ms: config.connect_timeout_ms,
            read_timeout_ms: config.read_timeout_ms,
            write_timeout_ms: config.write_timeout_ms,
        }
    }

    fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        if self.connect_timeout_ms == 0 {
            return TcpStream::connect((host, port));
        }

        let timeout = Duration::from_millis(self.connect_timeout_ms);
        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("could not resolve {}:{}", host, port),
            )
        }))
    }
}

impl Transport for TcpTransport {
    type Conn = Connection;

    fn open(&self, host: &str, port: u16) -> Result<Connection> {
        let stream = self.connect(host, port)?;
        let mut connection = Connection::new(stream)?;
        connection.set_timeouts(self.read_timeout_ms, self.write_timeout_ms)?;
        tracing::trace!("Connected to {}", connection.peer_addr());
        Ok(connection)
    }
}
