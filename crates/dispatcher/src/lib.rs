//! # Dispatcher
//!
//! 事件分发模块。
//!
//! 负责：
//! - 按 schema 规则校验 `Event`
//! - 序列化并按事件类型路由到 topic
//! - 通过 `BrokerPort` 发送，或在 dry-run 模式下仅模拟
//! - 批量请求逐条处理，失败不影响其余事件

pub mod batch;
pub mod brokers;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod routing;
pub mod validation;

pub use brokers::{create_broker, AnyBroker, LogBroker, PulsarRestBroker};
pub use contracts::{BrokerPort, Event};
pub use dispatcher::{create_dispatcher, encode, Dispatcher, DispatcherBuilder};
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use routing::resolve_topic;
pub use validation::{validate, ValidationError};
