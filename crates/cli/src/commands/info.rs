//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{GatewayConfig, SchemaRules};
use serde::Serialize;
use tracing::info;

use super::resolve_config_path;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    broker: BrokerInfo,
    api: ApiInfo,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    routes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    schemas: BTreeMap<String, Vec<String>>,
    reject_unknown_types: bool,
}

#[derive(Serialize)]
struct BrokerInfo {
    kind: String,
    url: String,
    default_topic: String,
    producer_name: String,
    timeout_ms: u64,
}

#[derive(Serialize)]
struct ApiInfo {
    host: String,
    port: u16,
    dry_run: bool,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let path = resolve_config_path(args.config.as_deref())?;
    info!(config = %path.display(), "Loading configuration info");

    let config = ConfigLoader::load_from_path(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    let rules = ConfigLoader::load_schema_rules(&config).context("Failed to load schema files")?;

    let info = build_config_info(&config, &rules, args);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info, args);
    }

    Ok(())
}

fn build_config_info(config: &GatewayConfig, rules: &SchemaRules, args: &InfoArgs) -> ConfigInfo {
    let routes = if args.routes {
        config
            .routing_table()
            .iter()
            .map(|(t, topic)| (t.to_string(), topic.to_string()))
            .collect()
    } else {
        BTreeMap::new()
    };

    let schemas = if args.schemas {
        rules
            .iter()
            .map(|(t, rule)| (t.to_string(), rule.required.clone()))
            .collect()
    } else {
        BTreeMap::new()
    };

    ConfigInfo {
        version: format!("{:?}", config.version),
        broker: BrokerInfo {
            kind: format!("{:?}", config.broker.kind),
            url: config.broker.url.clone(),
            default_topic: config.broker.default_topic.clone(),
            producer_name: config.broker.producer_name.clone(),
            timeout_ms: config.broker.timeout_ms,
        },
        api: ApiInfo {
            host: config.api.host.clone(),
            port: config.api.port,
            dry_run: config.api.dry_run,
        },
        routes,
        schemas,
        reject_unknown_types: rules.rejects_unknown_types(),
    }
}

fn print_config_info(info: &ConfigInfo, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Event Gateway Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📡 Broker");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Kind: {}", info.broker.kind);
    println!("   ├─ URL: {}", info.broker.url);
    println!("   ├─ Default topic: {}", info.broker.default_topic);
    println!("   ├─ Producer: {}", info.broker.producer_name);
    println!("   └─ Timeout: {} ms", info.broker.timeout_ms);

    println!("\n🌐 API");
    println!("   ├─ Listen: {}:{}", info.api.host, info.api.port);
    println!(
        "   └─ Mode: {}",
        if info.api.dry_run { "dry-run" } else { "live" }
    );

    if args.routes {
        println!("\n🔀 Routes ({})", info.routes.len());
        print_tree(info.routes.iter().map(|(t, topic)| format!("{t} → {topic}")));
    }

    if args.schemas {
        println!(
            "\n📋 Schema rules ({}, unknown types {})",
            info.schemas.len(),
            if info.reject_unknown_types { "rejected" } else { "accepted" }
        );
        print_tree(
            info.schemas
                .iter()
                .map(|(t, required)| format!("{t}: {}", required.join(", "))),
        );
    }

    println!();
}

fn print_tree(lines: impl ExactSizeIterator<Item = String>) {
    let len = lines.len();
    for (i, line) in lines.enumerate() {
        let prefix = if i + 1 == len { "└─" } else { "├─" };
        println!("   {} {}", prefix, line);
    }
}
