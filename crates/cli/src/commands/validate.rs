//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{BrokerKind, GatewayConfig};
use serde::Serialize;
use tracing::info;

use super::resolve_config_path;
use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    broker: String,
    default_topic: String,
    dry_run: bool,
    route_count: usize,
    schema_rule_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let path = resolve_config_path(args.config.as_deref())?;
    info!(config = %path.display(), "Validating configuration");

    let result = validate_config(&path);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(path: &std::path::Path) -> ValidationResult {
    let config_path = path.display().to_string();

    // Schema files are part of a valid configuration
    let loaded = ConfigLoader::load_from_path(path).and_then(|config| {
        let rules = ConfigLoader::load_schema_rules(&config)?;
        Ok((config, rules))
    });

    match loaded {
        Ok((config, rules)) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    broker: format!("{:?}", config.broker.kind),
                    default_topic: config.broker.default_topic.clone(),
                    dry_run: config.api.dry_run,
                    route_count: config.routing_table().len(),
                    schema_rule_count: rules.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &GatewayConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.broker.kind == BrokerKind::Log && !config.api.dry_run {
        warnings.push("broker.kind = \"log\" - events are logged, never delivered".to_string());
    }

    if config.routing.as_ref().is_some_and(|r| r.is_empty()) {
        warnings.push("[routing] is empty - every event goes to the default topic".to_string());
    }

    if config.validation.reject_unknown_types && config.schemas.is_empty() {
        warnings.push(
            "validation.reject_unknown_types with no [schemas] - only built-in types are accepted"
                .to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Broker: {}", summary.broker);
            println!("  Default topic: {}", summary.default_topic);
            println!("  Dry-run: {}", summary.dry_run);
            println!("  Routes: {}", summary.route_count);
            println!("  Schema rules: {}", summary.schema_rule_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_valid_config_summary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wage.toml"), "required = [\"dossierId\", \"year\"]").unwrap();
        let path = write_config(
            &dir,
            r#"
[broker]
url = "http://localhost:8080"
default_topic = "persistent://tenant/ns/events"

[schemas]
WAGE_ERROR = "wage.toml"
"#,
        );

        let result = validate_config(&path);
        assert!(result.valid, "{:?}", result.error);
        let summary = result.summary.unwrap();
        assert_eq!(summary.route_count, 2);
        assert_eq!(summary.schema_rule_count, 2);
    }

    #[test]
    fn test_missing_default_topic_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[broker]\nurl = \"http://localhost:8080\"\n");
        let result = validate_config(&path);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("default_topic"));
    }

    #[test]
    fn test_unreadable_schema_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[broker]
url = "http://localhost:8080"
default_topic = "events"

[schemas]
WAGE_ERROR = "missing.toml"
"#,
        );
        assert!(!validate_config(&path).valid);
    }

    #[test]
    fn test_log_broker_warning() {
        let config = ConfigLoader::load_from_str(
            "[broker]\nkind = \"log\"\nurl = \"-\"\ndefault_topic = \"events\"\n",
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();
        let warnings = collect_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("never delivered"));
    }
}
