//! Schema file loading
//!
//! Each configured schema file holds one `SchemaRule` (TOML or JSON) and
//! replaces the built-in rule for its event type.

use std::path::Path;

use contracts::{ContractError, GatewayConfig, SchemaRule, SchemaRules};
use tracing::debug;

use crate::parser::{self, ConfigFormat};

/// Build the schema rule set for `config`
///
/// Starts from the built-in rules, applies every configured schema file and
/// the unknown-type policy.
pub fn load_rules(config: &GatewayConfig) -> Result<SchemaRules, ContractError> {
    let mut rules = SchemaRules::builtin();
    for (event_type, path) in &config.schemas {
        let rule = load_rule(path).map_err(|e| {
            ContractError::config_validation(format!("schemas.{event_type}"), e.to_string())
        })?;
        debug!(
            event_type = %event_type,
            path = %path.display(),
            required = rule.required.len(),
            "Schema rule loaded"
        );
        rules = rules.with_rule(event_type.clone(), rule);
    }
    Ok(rules.reject_unknown_types(config.validation.reject_unknown_types))
}

/// Load one schema file
pub fn load_rule(path: &Path) -> Result<SchemaRule, ContractError> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ConfigFormat::from_extension)
        .ok_or_else(|| {
            ContractError::config_parse(format!(
                "unsupported schema file format: {}",
                path.display()
            ))
        })?;
    let content = std::fs::read_to_string(path)?;
    let rule: SchemaRule = parser::parse(&content, format)?;
    if rule.required.iter().any(String::is_empty) {
        return Err(ContractError::config_validation(
            path.display().to_string(),
            "required field names cannot be empty",
        ));
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ApiConfig, BrokerConfig, BrokerKind, ConfigVersion, ValidationConfig};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_with(schemas: HashMap<String, std::path::PathBuf>) -> GatewayConfig {
        GatewayConfig {
            version: ConfigVersion::V1,
            broker: BrokerConfig {
                kind: BrokerKind::Log,
                url: "log://".into(),
                default_topic: "events".into(),
                producer_name: "event-gateway".into(),
                timeout_ms: 1000,
            },
            api: ApiConfig::default(),
            routing: None,
            schemas,
            validation: ValidationConfig::default(),
        }
    }

    fn schema_file(ext: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_schema_file_overrides_builtin() {
        let file = schema_file(".toml", r#"required = ["dossierId", "period"]"#);
        let cfg = config_with(HashMap::from([(
            "WAGE_ERROR".to_string(),
            file.path().to_path_buf(),
        )]));

        let rules = load_rules(&cfg).unwrap();
        assert_eq!(
            rules.rule_for("WAGE_ERROR").unwrap().required,
            vec!["dossierId", "period"]
        );
        assert!(rules.rule_for("SIGNALITIEK_ERROR").is_some());
    }

    #[test]
    fn test_schema_file_adds_new_type() {
        let file = schema_file(".json", r#"{ "required": ["invoiceId"] }"#);
        let cfg = config_with(HashMap::from([(
            "INVOICE_ERROR".to_string(),
            file.path().to_path_buf(),
        )]));

        let rules = load_rules(&cfg).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(
            rules.rule_for("INVOICE_ERROR").unwrap().required,
            vec!["invoiceId"]
        );
    }

    #[test]
    fn test_missing_schema_file_fails() {
        let cfg = config_with(HashMap::from([(
            "WAGE_ERROR".to_string(),
            "/nonexistent/wage.toml".into(),
        )]));
        let err = load_rules(&cfg).unwrap_err().to_string();
        assert!(err.contains("schemas.WAGE_ERROR"), "got: {err}");
    }

    #[test]
    fn test_unknown_type_policy_applied() {
        let mut cfg = config_with(HashMap::new());
        cfg.validation.reject_unknown_types = true;
        assert!(load_rules(&cfg).unwrap().rejects_unknown_types());
    }

    #[test]
    fn test_blank_required_key_rejected() {
        let file = schema_file(".toml", r#"required = ["dossierId", ""]"#);
        assert!(load_rule(file.path()).is_err());
    }
}
