//! LogBroker - logs each publish via tracing instead of sending it

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bytes::Bytes;
use contracts::{BrokerPort, ContractError};
use tracing::{info, instrument};

/// Broker that records sends in the log and hands out `log:<n>` ids
pub struct LogBroker {
    name: String,
    sequence: AtomicU64,
    closed: AtomicBool,
}

impl LogBroker {
    /// Create a new LogBroker with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }
}

impl BrokerPort for LogBroker {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_broker_send",
        skip(self, payload),
        fields(broker = %self.name, bytes = payload.len())
    )]
    async fn send(&self, topic: &str, payload: Bytes) -> Result<String, ContractError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ContractError::broker_unavailable(&self.name, "broker closed"));
        }
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        info!(broker = %self.name, topic, seq, bytes = payload.len(), "Publish logged");
        Ok(format!("log:{seq}"))
    }

    #[instrument(name = "log_broker_close", skip(self))]
    async fn close(&self) -> Result<(), ContractError> {
        self.closed.store(true, Ordering::Release);
        info!(broker = %self.name, "LogBroker closed");
        Ok(())
    }
}
