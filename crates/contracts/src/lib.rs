//! # Contracts
//!
//! Frozen interface contracts shared by every gateway crate: the event model,
//! dispatch outcomes, routing and schema tables, configuration, and the
//! broker port. Business crates depend on this crate only; reverse
//! dependencies are prohibited.
//!
//! ## Lifetime model
//! - `Event` lives for exactly one dispatch call
//! - `RoutingTable` / `SchemaRules` are built once at startup and never mutated

mod broker;
mod config;
mod error;
mod event;
mod outcome;
mod routing;
mod schema;
mod topic;

pub use broker::{BrokerPort, LocalBrokerPort};
pub use config::*;
pub use error::*;
pub use event::*;
pub use outcome::*;
pub use routing::RoutingTable;
pub use schema::{SchemaRule, SchemaRules};
pub use topic::{TopicDomain, TopicName};
