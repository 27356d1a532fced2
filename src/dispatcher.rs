//! Operation Dispatcher
//!
//! Runs one operation as one round trip over one fresh connection.
//!
//! ## Flow
//! 1. Check the envelope into an `Operation` (fails without touching the network)
//! 2. Open a connection through the transport
//! 3. Write the request, read the reply
//! 4. Drop the connection, whether step 3 succeeded or not

use crate::config::ClientConfig;
use crate::error::Result;
use crate::network::Transport;
use crate::protocol::{read_reply, write_request, Envelope, Operation, Reply};

/// Encodes requests and decodes replies over a transport it borrows per call
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Perform the exchange described by `envelope` against the configured cache
    pub fn dispatch(&self, config: &ClientConfig, envelope: Envelope) -> Result<Reply> {
        let operation = Operation::try_from(envelope)?;
        let op = operation.op_code();

        tracing::debug!(
            op = %op,
            cache = %config.cache_name,
            addr = %config.address(),
            "Dispatching operation"
        );

        let mut connection = self.transport.open(&config.host, config.port)?;
        write_request(&mut connection, &operation, &config.cache_name)?;
        let reply = read_reply(&mut connection, operation.reply_kind(), config.max_body_size)?;

        tracing::trace!(op = %op, reply = reply.kind(), "Operation complete");
        Ok(reply)
    }
}
