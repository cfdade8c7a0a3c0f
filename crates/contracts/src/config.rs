//! GatewayConfig - Config Loader output
//!
//! Describes the full gateway configuration: broker connection, HTTP
//! listener, routing table, schema files and validation policy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use validator::Validate;

use crate::{DispatchMode, RoutingTable};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewayConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Broker connection
    #[validate(nested)]
    pub broker: BrokerConfig,

    /// HTTP listener
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,

    /// Event type -> topic; the built-in table applies when absent
    #[serde(default)]
    pub routing: Option<HashMap<String, String>>,

    /// Event type -> schema file path
    #[serde(default)]
    pub schemas: HashMap<String, PathBuf>,

    /// Schema validation policy
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl GatewayConfig {
    /// Routing table for this configuration
    pub fn routing_table(&self) -> RoutingTable {
        match &self.routing {
            Some(routes) => routes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => RoutingTable::builtin(),
        }
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        DispatchMode::from_dry_run(self.api.dry_run)
    }
}

/// Broker adapter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerKind {
    /// Pulsar REST producer endpoint
    #[default]
    PulsarRest,
    /// Log-only broker, nothing leaves the process
    Log,
}

/// Broker connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrokerConfig {
    #[serde(default)]
    pub kind: BrokerKind,

    /// Broker service URL
    #[serde(default)]
    #[validate(length(min = 1, message = "broker.url must be set"))]
    pub url: String,

    /// Topic used for event types without a route
    #[serde(default)]
    #[validate(length(min = 1, message = "broker.default_topic must be set"))]
    pub default_topic: String,

    /// Producer name reported to the broker
    #[serde(default = "default_producer_name")]
    #[validate(length(min = 1))]
    pub producer_name: String,

    /// Per-send timeout (milliseconds)
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1))]
    pub timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            kind: BrokerKind::default(),
            url: String::new(),
            default_topic: String::new(),
            producer_name: default_producer_name(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_producer_name() -> String {
    "event-gateway".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Validate and serialize but never publish
    #[serde(default)]
    pub dry_run: bool,

    /// Largest accepted request body (bytes)
    #[serde(default = "default_max_body_bytes")]
    #[validate(range(min = 1))]
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dry_run: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

/// Schema validation policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject event types without a schema rule
    #[serde(default)]
    pub reject_unknown_types: bool,
}
