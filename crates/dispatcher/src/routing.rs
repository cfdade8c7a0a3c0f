//! Topic resolver

use contracts::RoutingTable;

/// Map `event_type` to its topic, falling back to `default_topic`
///
/// Exact match only; never fails.
pub fn resolve_topic<'a>(
    event_type: &str,
    routing: &'a RoutingTable,
    default_topic: &'a str,
) -> &'a str {
    routing.get(event_type).unwrap_or(default_topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "persistent://tenant/ns/events";

    #[test]
    fn test_mapped_type() {
        let table = RoutingTable::builtin();
        assert_eq!(
            resolve_topic("WAGE_ERROR", &table, DEFAULT),
            "persistent://tenant/ns/wage-errors"
        );
        assert_eq!(
            resolve_topic("SIGNALITIEK_ERROR", &table, DEFAULT),
            "persistent://tenant/ns/signalitiek-errors"
        );
    }

    #[test]
    fn test_unmapped_type_uses_default() {
        let table = RoutingTable::builtin();
        assert_eq!(resolve_topic("UNKNOWN", &table, DEFAULT), DEFAULT);
        assert_eq!(resolve_topic("", &table, DEFAULT), DEFAULT);
    }

    #[test]
    fn test_no_prefix_matching() {
        let table = RoutingTable::new().with_route("WAGE", "wages");
        assert_eq!(resolve_topic("WAGE_ERROR", &table, DEFAULT), DEFAULT);
        assert_eq!(resolve_topic("WAGE", &table, DEFAULT), "wages");
    }

    #[test]
    fn test_empty_table() {
        let table = RoutingTable::new();
        assert_eq!(resolve_topic("WAGE_ERROR", &table, DEFAULT), DEFAULT);
    }
}
