//! SchemaRules - per event type required payload fields

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{SIGNALITIEK_ERROR, WAGE_ERROR};

/// Required payload keys for one event type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRule {
    /// Keys that must be present in the payload, checked in order
    #[serde(default)]
    pub required: Vec<String>,
}

impl SchemaRule {
    pub fn required<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Rule set keyed by event type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRules {
    rules: HashMap<String, SchemaRule>,
    reject_unknown_types: bool,
}

impl SchemaRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules shipped with the gateway
    pub fn builtin() -> Self {
        Self::new()
            .with_rule(
                SIGNALITIEK_ERROR,
                SchemaRule::required(["errorCode", "employerId"]),
            )
            .with_rule(WAGE_ERROR, SchemaRule::required(["dossierId"]))
    }

    /// Insert or replace the rule for `event_type`
    pub fn with_rule(mut self, event_type: impl Into<String>, rule: SchemaRule) -> Self {
        self.rules.insert(event_type.into(), rule);
        self
    }

    /// Reject event types that have no rule instead of accepting them
    pub fn reject_unknown_types(mut self, reject: bool) -> Self {
        self.reject_unknown_types = reject;
        self
    }

    pub fn rejects_unknown_types(&self) -> bool {
        self.reject_unknown_types
    }

    pub fn rule_for(&self, event_type: &str) -> Option<&SchemaRule> {
        self.rules.get(event_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}
