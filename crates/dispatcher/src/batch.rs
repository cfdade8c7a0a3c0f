//! Batch coordinator - one outcome per submitted event, in order

use contracts::{BatchItem, BatchResult, BrokerPort, Event};
use tracing::{info, instrument};

use crate::dispatcher::Dispatcher;

impl<B: BrokerPort + Sync> Dispatcher<B> {
    /// Dispatch `events` sequentially
    ///
    /// A failing item never stops the rest. Every failure, broker faults
    /// included, is reported inline on its item. The top-level status only
    /// reflects the mode.
    #[instrument(
        name = "dispatcher_dispatch_batch",
        skip(self, events),
        fields(count = events.len(), correlation_id = %correlation_id)
    )]
    pub async fn dispatch_batch(&self, events: Vec<Event>, correlation_id: &str) -> BatchResult {
        let mut items = Vec::with_capacity(events.len());
        for (index, event) in events.into_iter().enumerate() {
            let outcome = self.process(event, correlation_id).await;
            items.push(BatchItem { index, outcome });
        }

        let result = BatchResult {
            status: self.mode().summary_status(),
            items,
        };

        self.metrics_handle().inc_batch_count();
        observability::record_batch(result.count(), result.failed_count());
        info!(
            count = result.count(),
            failed = result.failed_count(),
            correlation_id = %correlation_id,
            "Batch processed"
        );
        result
    }
}
