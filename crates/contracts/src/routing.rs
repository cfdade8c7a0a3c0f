//! RoutingTable - event type to topic mapping
//!
//! Loaded once at startup, immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{SIGNALITIEK_ERROR, WAGE_ERROR};

/// Static event type -> topic table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    routes: HashMap<String, String>,
}

impl RoutingTable {
    /// Create an empty table (every type falls back to the default topic)
    pub fn new() -> Self {
        Self::default()
    }

    /// Table used when configuration provides none
    pub fn builtin() -> Self {
        Self::new()
            .with_route(SIGNALITIEK_ERROR, "persistent://tenant/ns/signalitiek-errors")
            .with_route(WAGE_ERROR, "persistent://tenant/ns/wage-errors")
    }

    pub fn with_route(mut self, event_type: impl Into<String>, topic: impl Into<String>) -> Self {
        self.routes.insert(event_type.into(), topic.into());
        self
    }

    /// Exact-match lookup
    pub fn get(&self, event_type: &str) -> Option<&str> {
        self.routes.get(event_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for RoutingTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}
