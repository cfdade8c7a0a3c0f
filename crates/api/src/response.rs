//! Response bodies

use contracts::{BatchItem, BatchResult, DispatchOutcome, DispatchStatus, Event};
use serde::Serialize;

/// `201` body for an accepted single event
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub status: DispatchStatus,
    pub topic: String,
    pub bytes: usize,
    pub dry_run: bool,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub event: Event,
}

impl EventResponse {
    /// Build from a non-error outcome
    pub fn new(outcome: DispatchOutcome, dry_run: bool) -> Self {
        Self {
            status: outcome.status,
            topic: outcome.topic.unwrap_or_default(),
            bytes: outcome.byte_size.unwrap_or_default(),
            dry_run,
            correlation_id: outcome.correlation_id,
            message_id: outcome.message_id,
            event: outcome.event,
        }
    }
}

/// `200` body for a batch
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub status: DispatchStatus,
    pub count: usize,
    pub dry_run: bool,
    pub results: Vec<BatchItemResponse>,
}

impl BatchResponse {
    pub fn new(result: BatchResult, dry_run: bool) -> Self {
        Self {
            status: result.status,
            count: result.count(),
            dry_run,
            results: result.items.into_iter().map(BatchItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResponse {
    pub index: usize,
    pub status: DispatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Failure prefixed by its stage, e.g. `send error: ...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub correlation_id: String,
    pub event: Event,
}

impl From<BatchItem> for BatchItemResponse {
    fn from(item: BatchItem) -> Self {
        let outcome = item.outcome;
        Self {
            index: item.index,
            status: outcome.status,
            topic: outcome.topic,
            bytes: outcome.byte_size,
            message_id: outcome.message_id,
            error: outcome.failure.map(|f| f.to_string()),
            correlation_id: outcome.correlation_id,
            event: outcome.event,
        }
    }
}
