//! Schema validator - required payload field checks

use contracts::{Event, SchemaRules};
use thiserror::Error;

/// Why an event failed schema validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required payload key is absent
    #[error("payload.{field} is required for {event_type}")]
    MissingField { event_type: String, field: String },

    /// No rule exists for the type and the rule set is strict
    #[error("unknown event type '{event_type}'")]
    UnknownType { event_type: String },
}

/// Check `event` against `rules`
///
/// Presence only: a key mapped to `null` counts as present. Keys are checked
/// in rule order and the first missing one is reported. Types without a rule
/// pass unless the rule set rejects unknown types.
pub fn validate(event: &Event, rules: &SchemaRules) -> Result<(), ValidationError> {
    let Some(rule) = rules.rule_for(&event.event_type) else {
        if rules.rejects_unknown_types() {
            return Err(ValidationError::UnknownType {
                event_type: event.event_type.clone(),
            });
        }
        return Ok(());
    };

    match rule
        .required
        .iter()
        .find(|key| !event.payload.contains_key(key.as_str()))
    {
        Some(missing) => Err(ValidationError::MissingField {
            event_type: event.event_type.clone(),
            field: missing.clone(),
        }),
        None => Ok(()),
    }
}
