//! DispatchOutcome - Dispatcher output
//!
//! Per-event result records and the batch aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Event;

/// Dispatch operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// Validate and serialize, never publish
    DryRun,
    /// Publish through the broker port
    #[default]
    Live,
}

impl DispatchMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Live
        }
    }

    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }

    /// Top-level status reported for a batch in this mode
    pub fn summary_status(self) -> DispatchStatus {
        match self {
            Self::DryRun => DispatchStatus::DryRun,
            Self::Live => DispatchStatus::Sent,
        }
    }
}

/// Status of a single dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchStatus {
    Sent,
    DryRun,
    Error,
}

impl DispatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::DryRun => "dry-run",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pipeline stage failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Required payload field missing (client error)
    Validation,
    /// Event could not be encoded (internal defect)
    Serialization,
    /// Broker rejected or failed to deliver
    Send,
    /// Broker no longer usable
    Unavailable,
}

impl FailureKind {
    /// Prefix used when the failure is reported inline in a batch item
    pub fn label(self) -> &'static str {
        match self {
            Self::Validation => "schema validation failed",
            Self::Serialization => "serialization error",
            Self::Send => "send error",
            Self::Unavailable => "broker unavailable",
        }
    }
}

/// Failure captured as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.detail)
    }
}

/// Result of dispatching one event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,

    /// Resolved topic (unset when the event failed before routing)
    pub topic: Option<String>,

    /// Serialized size in bytes (unset when serialization never happened)
    pub byte_size: Option<usize>,

    /// Broker message identifier, only for `sent`
    pub message_id: Option<String>,

    pub failure: Option<DispatchFailure>,

    pub correlation_id: String,

    /// The event exactly as received
    pub event: Event,
}

impl DispatchOutcome {
    /// Failure before the event was routed (validation or serialization)
    pub fn rejected(
        event: Event,
        correlation_id: impl Into<String>,
        kind: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status: DispatchStatus::Error,
            topic: None,
            byte_size: None,
            message_id: None,
            failure: Some(DispatchFailure {
                kind,
                detail: detail.into(),
            }),
            correlation_id: correlation_id.into(),
            event,
        }
    }

    /// Failure after routing (send or broker fault); topic and size are kept
    pub fn undelivered(
        event: Event,
        correlation_id: impl Into<String>,
        topic: impl Into<String>,
        byte_size: usize,
        kind: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status: DispatchStatus::Error,
            topic: Some(topic.into()),
            byte_size: Some(byte_size),
            message_id: None,
            failure: Some(DispatchFailure {
                kind,
                detail: detail.into(),
            }),
            correlation_id: correlation_id.into(),
            event,
        }
    }

    pub fn dry_run(
        event: Event,
        correlation_id: impl Into<String>,
        topic: impl Into<String>,
        byte_size: usize,
    ) -> Self {
        Self {
            status: DispatchStatus::DryRun,
            topic: Some(topic.into()),
            byte_size: Some(byte_size),
            message_id: None,
            failure: None,
            correlation_id: correlation_id.into(),
            event,
        }
    }

    pub fn sent(
        event: Event,
        correlation_id: impl Into<String>,
        topic: impl Into<String>,
        byte_size: usize,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            status: DispatchStatus::Sent,
            topic: Some(topic.into()),
            byte_size: Some(byte_size),
            message_id: Some(message_id.into()),
            failure: None,
            correlation_id: correlation_id.into(),
            event,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == DispatchStatus::Error
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    /// Raw failure detail without the stage prefix
    pub fn error_detail(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.detail.as_str())
    }
}

/// One entry of a batch result
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Zero-based submission index
    pub index: usize,
    pub outcome: DispatchOutcome,
}

/// Ordered batch result
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    /// Aggregate status, fixed by mode
    pub status: DispatchStatus,
    pub items: Vec<BatchItem>,
}

impl BatchResult {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of items whose own status is `error`
    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_error()).count()
    }
}
