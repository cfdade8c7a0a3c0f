//! `serve` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::GatewayConfig;
use config_loader::ConfigLoader;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use super::resolve_config_path;
use crate::cli::ServeArgs;
use crate::error::CliError;

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let path = resolve_config_path(args.config.as_deref())?;
    info!(config = %path.display(), "Loading configuration");

    let mut config = ConfigLoader::load_from_path(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    apply_overrides(&mut config, args);
    ConfigLoader::validate(&config).context("Configuration invalid after overrides")?;

    let rules = ConfigLoader::load_schema_rules(&config).context("Failed to load schema files")?;

    info!(
        broker = ?config.broker.kind,
        broker_url = %config.broker.url,
        default_topic = %config.broker.default_topic,
        dry_run = config.api.dry_run,
        schema_rules = rules.len(),
        "Configuration loaded"
    );

    let dispatcher = Arc::new(
        dispatcher::create_dispatcher(&config, rules).context("Failed to create dispatcher")?,
    );
    let app = api::router_with_body_limit(Arc::clone(&dispatcher), config.api.max_body_bytes);

    let addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::bind(&addr, e.to_string()))?;

    info!(address = %addr, "Starting API");

    axum::serve(listener, app)
        .with_graceful_shutdown(setup_shutdown_signal())
        .await
        .map_err(|e| CliError::server(e.to_string()))?;

    warn!("Received shutdown signal, closing broker...");
    dispatcher.shutdown().await;

    info!("Event Gateway finished");
    Ok(())
}

/// Apply CLI / environment overrides on top of the file configuration
fn apply_overrides(config: &mut GatewayConfig, args: &ServeArgs) {
    if let Some(port) = args.port {
        info!(port, "Overriding listen port from CLI");
        config.api.port = port;
    }
    if args.dry_run {
        info!("Forcing dry-run mode from CLI");
        config.api.dry_run = true;
    }
    if let Some(ref url) = args.broker_url {
        info!(url = %url, "Overriding broker URL from CLI");
        config.broker.url = url.clone();
    }
}

/// Resolve on Ctrl+C or SIGTERM
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
