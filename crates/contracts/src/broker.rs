//! BrokerPort trait - Dispatcher output interface
//!
//! Abstract send capability backed by a real broker connection, or by a
//! no-op / fake implementation in dry-run and test environments.

use bytes::Bytes;

use crate::ContractError;

/// Message broker trait
///
/// Implementations must tolerate concurrent `send` calls from independent
/// requests; any serialization of access is the implementation's concern.
#[trait_variant::make(BrokerPort: Send)]
pub trait LocalBrokerPort {
    /// Broker name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Publish one serialized event to `topic`
    ///
    /// Returns the broker-assigned message identifier.
    ///
    /// # Errors
    /// - `BrokerSend` when the broker rejects or cannot deliver the message
    /// - `BrokerUnavailable` when the connection is no longer usable
    async fn send(&self, topic: &str, payload: Bytes) -> Result<String, ContractError>;

    /// Release the connection; later sends report `BrokerUnavailable`
    async fn close(&self) -> Result<(), ContractError>;
}
