//! Dispatcher - validate, serialize, route, then send or simulate

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, instrument, warn};

use contracts::{
    BrokerPort, DispatchMode, DispatchOutcome, Event, FailureKind, GatewayConfig, RoutingTable,
    SchemaRules,
};

use crate::brokers::{create_broker, AnyBroker};
use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::routing::resolve_topic;
use crate::validation::validate;

/// Builder for creating a Dispatcher
pub struct DispatcherBuilder<B> {
    broker: B,
    default_topic: String,
    mode: DispatchMode,
    routing: Arc<RoutingTable>,
    rules: Arc<SchemaRules>,
}

impl<B: BrokerPort> DispatcherBuilder<B> {
    /// Create a new DispatcherBuilder with built-in routing and schema rules
    pub fn new(broker: B, default_topic: impl Into<String>) -> Self {
        Self {
            broker,
            default_topic: default_topic.into(),
            mode: DispatchMode::Live,
            routing: Arc::new(RoutingTable::builtin()),
            rules: Arc::new(SchemaRules::builtin()),
        }
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn routing(mut self, routing: impl Into<Arc<RoutingTable>>) -> Self {
        self.routing = routing.into();
        self
    }

    pub fn rules(mut self, rules: impl Into<Arc<SchemaRules>>) -> Self {
        self.rules = rules.into();
        self
    }

    pub fn build(self) -> Dispatcher<B> {
        info!(
            broker = self.broker.name(),
            mode = ?self.mode,
            default_topic = %self.default_topic,
            routes = self.routing.len(),
            schema_rules = self.rules.len(),
            "Dispatcher ready"
        );
        Dispatcher {
            broker: self.broker,
            default_topic: self.default_topic,
            mode: self.mode,
            routing: self.routing,
            rules: self.rules,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }
}

/// Create a dispatcher from gateway configuration
#[instrument(name = "dispatcher_create", skip(config, rules))]
pub fn create_dispatcher(
    config: &GatewayConfig,
    rules: SchemaRules,
) -> Result<Dispatcher<AnyBroker>, DispatcherError> {
    let broker = create_broker(&config.broker)?;
    Ok(DispatcherBuilder::new(broker, config.broker.default_topic.clone())
        .mode(config.dispatch_mode())
        .routing(config.routing_table())
        .rules(rules)
        .build())
}

/// Dispatch engine shared by the single and batch paths
pub struct Dispatcher<B> {
    broker: B,
    default_topic: String,
    mode: DispatchMode,
    routing: Arc<RoutingTable>,
    rules: Arc<SchemaRules>,
    metrics: Arc<DispatchMetrics>,
}

impl<B: BrokerPort + Sync> Dispatcher<B> {
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    pub fn default_topic(&self) -> &str {
        &self.default_topic
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub(crate) fn metrics_handle(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Metric label for an event type
    ///
    /// Only types present in the routing table or schema rules get their own
    /// series; everything else is folded into `other`.
    pub(crate) fn metric_label<'a>(&self, event_type: &'a str) -> &'a str {
        if self.routing.get(event_type).is_some() || self.rules.rule_for(event_type).is_some() {
            event_type
        } else {
            observability::metrics::OTHER_EVENT_TYPE
        }
    }

    /// Dispatch one event
    ///
    /// Validation, serialization and send failures come back as `error`
    /// outcomes. Only a broker that reports itself unusable surfaces as `Err`.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, event),
        fields(event_type = %event.event_type, correlation_id = %correlation_id)
    )]
    pub async fn dispatch(
        &self,
        event: Event,
        correlation_id: &str,
    ) -> Result<DispatchOutcome, DispatcherError> {
        let outcome = self.process(event, correlation_id).await;
        if outcome.failure_kind() == Some(FailureKind::Unavailable) {
            return Err(DispatcherError::BrokerUnavailable {
                message: outcome.error_detail().unwrap_or_default().to_string(),
            });
        }
        Ok(outcome)
    }

    /// Run the full pipeline for one event and record metrics
    pub(crate) async fn process(&self, event: Event, correlation_id: &str) -> DispatchOutcome {
        let outcome = self.run_pipeline(event, correlation_id).await;
        self.metrics.record(outcome.status, outcome.byte_size);
        observability::record_event_dispatched(
            self.metric_label(&outcome.event.event_type),
            outcome.status,
            outcome.byte_size,
        );
        outcome
    }

    async fn run_pipeline(&self, event: Event, correlation_id: &str) -> DispatchOutcome {
        // 1. Schema
        if let Err(e) = validate(&event, &self.rules) {
            warn!(
                event_type = %event.event_type,
                correlation_id = %correlation_id,
                error = %e,
                "Schema validation failed"
            );
            return DispatchOutcome::rejected(
                event,
                correlation_id,
                FailureKind::Validation,
                e.to_string(),
            );
        }

        // 2. Serialization
        let payload = match encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(correlation_id = %correlation_id, error = %e, "Failed to serialize event");
                return DispatchOutcome::rejected(
                    event,
                    correlation_id,
                    FailureKind::Serialization,
                    e.to_string(),
                );
            }
        };
        let byte_size = payload.len();

        // 3. Routing
        let topic = resolve_topic(&event.event_type, &self.routing, &self.default_topic).to_string();

        info!(
            event_type = %event.event_type,
            source_system = %event.source_system,
            topic = %topic,
            bytes = byte_size,
            correlation_id = %correlation_id,
            "Received event"
        );

        // 4. Dry-run
        if self.mode.is_dry_run() {
            debug!(correlation_id = %correlation_id, "Dry-run, not sending to broker");
            return DispatchOutcome::dry_run(event, correlation_id, topic, byte_size);
        }

        // 5. Live send
        match self.broker.send(&topic, payload).await {
            Ok(message_id) => {
                info!(
                    message_id = %message_id,
                    topic = %topic,
                    correlation_id = %correlation_id,
                    "Event sent to broker"
                );
                DispatchOutcome::sent(event, correlation_id, topic, byte_size, message_id)
            }
            Err(e) => {
                let kind = if e.is_unavailable() {
                    FailureKind::Unavailable
                } else {
                    FailureKind::Send
                };
                error!(
                    broker = self.broker.name(),
                    topic = %topic,
                    correlation_id = %correlation_id,
                    error = %e,
                    "Failed sending to broker"
                );
                DispatchOutcome::undelivered(
                    event,
                    correlation_id,
                    topic,
                    byte_size,
                    kind,
                    e.to_string(),
                )
            }
        }
    }

    /// Close the underlying broker
    #[instrument(name = "dispatcher_shutdown", skip(self))]
    pub async fn shutdown(&self) {
        if let Err(e) = self.broker.close().await {
            error!(broker = self.broker.name(), error = %e, "Broker close failed");
        }
        let snap = self.metrics.snapshot();
        info!(
            sent = snap.sent_count,
            dry_run = snap.dry_run_count,
            failed = snap.failure_count,
            bytes = snap.bytes_total,
            batches = snap.batch_count,
            "Dispatcher shutdown complete"
        );
    }
}

/// Serialize an event to its wire bytes
///
/// Payload keys are emitted in sorted order, so the length is deterministic
/// for a given event.
pub fn encode(event: &Event) -> Result<Bytes, contracts::ContractError> {
    serde_json::to_vec(event)
        .map(Bytes::from)
        .map_err(|e| contracts::ContractError::serialization(e.to_string()))
}
