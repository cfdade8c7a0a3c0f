//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::DispatchStatus;

/// Counters for one dispatcher, shared across requests
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Events published to the broker
    sent_count: AtomicU64,
    /// Events accepted in dry-run mode
    dry_run_count: AtomicU64,
    /// Events with an `error` outcome
    failure_count: AtomicU64,
    /// Serialized bytes of accepted events
    bytes_total: AtomicU64,
    /// Batch requests processed
    batch_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome
    pub fn record(&self, status: DispatchStatus, byte_size: Option<usize>) {
        let counter = match status {
            DispatchStatus::Sent => &self.sent_count,
            DispatchStatus::DryRun => &self.dry_run_count,
            DispatchStatus::Error => &self.failure_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if status != DispatchStatus::Error {
            if let Some(bytes) = byte_size {
                self.bytes_total.fetch_add(bytes as u64, Ordering::Relaxed);
            }
        }
    }

    /// Increment batch count
    pub fn inc_batch_count(&self) {
        self.batch_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    pub fn dry_run_count(&self) -> u64 {
        self.dry_run_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_total.load(Ordering::Relaxed)
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sent_count: self.sent_count(),
            dry_run_count: self.dry_run_count(),
            failure_count: self.failure_count(),
            bytes_total: self.bytes_total(),
            batch_count: self.batch_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sent_count: u64,
    pub dry_run_count: u64,
    pub failure_count: u64,
    pub bytes_total: u64,
    pub batch_count: u64,
}

impl MetricsSnapshot {
    /// Total events seen
    pub fn total(&self) -> u64 {
        self.sent_count + self.dry_run_count + self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_by_status() {
        let metrics = DispatchMetrics::new();
        metrics.record(DispatchStatus::Sent, Some(100));
        metrics.record(DispatchStatus::DryRun, Some(50));
        metrics.record(DispatchStatus::Error, Some(70));
        metrics.record(DispatchStatus::Error, None);

        let snap = metrics.snapshot();
        assert_eq!(snap.sent_count, 1);
        assert_eq!(snap.dry_run_count, 1);
        assert_eq!(snap.failure_count, 2);
        assert_eq!(snap.bytes_total, 150);
        assert_eq!(snap.total(), 4);
    }
}
