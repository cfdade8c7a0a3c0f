//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Per-event failures are reported as `DispatchOutcome` data; these errors
/// cover construction and faults that make the broker unusable.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Broker creation error
    #[error("failed to create broker '{name}': {message}")]
    BrokerCreation { name: String, message: String },

    /// Broker can no longer accept sends
    #[error("broker unavailable: {message}")]
    BrokerUnavailable { message: String },

    /// Contract error
    #[error("broker error: {0}")]
    Contract(#[from] contracts::ContractError),
}

impl DispatcherError {
    /// Create a broker creation error
    pub fn broker_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrokerCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
