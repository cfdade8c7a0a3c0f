//! Broker implementations
//!
//! Contains LogBroker and PulsarRestBroker, selected by `broker.kind`.

mod log;
mod pulsar_rest;

pub use self::log::LogBroker;
pub use self::pulsar_rest::PulsarRestBroker;

use bytes::Bytes;
use contracts::{BrokerConfig, BrokerKind, BrokerPort, ContractError};
use tracing::{info, instrument};

use crate::error::DispatcherError;

/// Broker chosen from configuration
pub enum AnyBroker {
    Log(LogBroker),
    PulsarRest(PulsarRestBroker),
}

/// Create the broker described by `config`
#[instrument(name = "broker_create", skip(config), fields(kind = ?config.kind))]
pub fn create_broker(config: &BrokerConfig) -> Result<AnyBroker, DispatcherError> {
    let broker = match config.kind {
        BrokerKind::Log => AnyBroker::Log(LogBroker::new("log")),
        BrokerKind::PulsarRest => AnyBroker::PulsarRest(
            PulsarRestBroker::new(config)
                .map_err(|e| DispatcherError::broker_creation("pulsar_rest", e.to_string()))?,
        ),
    };
    info!(broker = broker.name(), url = %config.url, "Broker created");
    Ok(broker)
}

impl BrokerPort for AnyBroker {
    fn name(&self) -> &str {
        match self {
            Self::Log(b) => b.name(),
            Self::PulsarRest(b) => b.name(),
        }
    }

    async fn send(&self, topic: &str, payload: Bytes) -> Result<String, ContractError> {
        match self {
            Self::Log(b) => b.send(topic, payload).await,
            Self::PulsarRest(b) => b.send(topic, payload).await,
        }
    }

    async fn close(&self) -> Result<(), ContractError> {
        match self {
            Self::Log(b) => b.close().await,
            Self::PulsarRest(b) => b.close().await,
        }
    }
}
