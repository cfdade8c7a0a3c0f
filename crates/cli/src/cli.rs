//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Event Gateway - validate, route and forward events to a message broker
#[derive(Parser, Debug)]
#[command(
    name = "event-gateway",
    author,
    version,
    about = "Event ingestion gateway",
    long_about = "An HTTP ingestion gateway for structured events.\n\n\
                  Validates events against per-type schema rules, resolves a \n\
                  destination topic and forwards them to the configured broker, \n\
                  or simulates the send in dry-run mode."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "EVENT_GATEWAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "json",
        global = true,
        env = "EVENT_GATEWAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeArgs),

    /// Validate configuration file without serving
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to configuration file (TOML or JSON); standard locations are searched when omitted
    #[arg(short, long, env = "EVENT_GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override listen port from configuration
    #[arg(long, env = "EVENT_GATEWAY_PORT")]
    pub port: Option<u16>,

    /// Force dry-run mode (validate and route, never publish)
    #[arg(long, env = "EVENT_GATEWAY_DRY_RUN")]
    pub dry_run: bool,

    /// Override broker URL from configuration
    #[arg(long, env = "EVENT_GATEWAY_BROKER_URL")]
    pub broker_url: Option<String>,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", env = "EVENT_GATEWAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the routing table
    #[arg(long)]
    pub routes: bool,

    /// Show schema rules
    #[arg(long)]
    pub schemas: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    #[default]
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
