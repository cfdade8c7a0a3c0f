//! Layered error definitions
//!
//! Categorized by source: config / event / broker

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Event Errors =====
    /// Event failed structural decoding (missing or empty required field)
    #[error("invalid event: '{field}' {message}")]
    InvalidEvent { field: String, message: String },

    /// Event could not be encoded to bytes
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Topic name could not be parsed
    #[error("invalid topic '{topic}': {message}")]
    InvalidTopic { topic: String, message: String },

    // ===== Broker Errors =====
    /// Broker rejected or failed to deliver a message.
    ///
    /// Displays the broker's message verbatim.
    #[error("{message}")]
    BrokerSend { broker: String, message: String },

    /// Broker client could not be created
    #[error("broker '{broker}' connection error: {message}")]
    BrokerConnection { broker: String, message: String },

    /// Broker is no longer usable (closed or shut down)
    #[error("broker '{broker}' unavailable: {message}")]
    BrokerUnavailable { broker: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid event error
    pub fn invalid_event(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create invalid topic error
    pub fn invalid_topic(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTopic {
            topic: topic.into(),
            message: message.into(),
        }
    }

    /// Create broker send error
    pub fn broker_send(broker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrokerSend {
            broker: broker.into(),
            message: message.into(),
        }
    }

    /// Create broker unavailable error
    pub fn broker_unavailable(broker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrokerUnavailable {
            broker: broker.into(),
            message: message.into(),
        }
    }

    /// True when the broker can no longer accept sends at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::BrokerUnavailable { .. })
    }
}
