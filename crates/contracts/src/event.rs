//! Event - HTTP ingestion input
//!
//! One client-submitted record. The payload shape is arbitrary JSON and is
//! echoed back unmodified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ContractError;

/// Event type for Signalitiek processing errors
pub const SIGNALITIEK_ERROR: &str = "SIGNALITIEK_ERROR";

/// Event type for wage calculation errors
pub const WAGE_ERROR: &str = "WAGE_ERROR";

/// Free-form event payload
pub type Payload = Map<String, Value>;

/// Externally submitted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Declared event type, drives schema and routing lookups
    pub event_type: String,

    /// Submitting system
    pub source_system: String,

    /// Event body
    pub payload: Payload,
}

impl Event {
    pub fn new(
        event_type: impl Into<String>,
        source_system: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            source_system: source_system.into(),
            payload,
        }
    }

    /// Reject events whose required string fields are blank.
    ///
    /// Serde already rejects absent fields; this closes the gap for `""`.
    pub fn check_required_fields(&self) -> Result<(), ContractError> {
        if self.event_type.is_empty() {
            return Err(ContractError::invalid_event("eventType", "must not be empty"));
        }
        if self.source_system.is_empty() {
            return Err(ContractError::invalid_event(
                "sourceSystem",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
