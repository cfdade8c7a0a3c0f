//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Locate and parse TOML/JSON gateway configuration
//! - Validate configuration legality (missing broker URL / default topic is fatal)
//! - Load per-type schema files into `SchemaRules`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("config.toml")).unwrap();
//! let rules = ConfigLoader::load_schema_rules(&config).unwrap();
//! println!("default topic: {}, rules: {}", config.broker.default_topic, rules.len());
//! ```

mod parser;
mod schema_files;
mod validator;

pub use contracts::GatewayConfig;
pub use parser::ConfigFormat;

use contracts::{ContractError, SchemaRules};
use std::path::{Path, PathBuf};

/// Application directory name used in the standard config locations
const APP_DIR: &str = "event-gateway";

/// Config file name looked up in every search location
const CONFIG_FILE: &str = "config.toml";

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// Relative schema paths are resolved against the config file's directory.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<GatewayConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let mut config = Self::load_from_str(&content, format)?;
        if let Some(base) = path.parent() {
            Self::resolve_schema_paths(&mut config, base);
        }
        Ok(config)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<GatewayConfig, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Build the schema rule set (built-ins + configured schema files)
    pub fn load_schema_rules(config: &GatewayConfig) -> Result<SchemaRules, ContractError> {
        schema_files::load_rules(config)
    }

    /// Re-run validation, e.g. after CLI overrides were applied
    pub fn validate(config: &GatewayConfig) -> Result<(), ContractError> {
        validator::validate(config)
    }

    /// Find the first existing config file in the standard locations
    ///
    /// Order: `./config/`, `./`, `/etc/event-gateway/`,
    /// `$XDG_CONFIG_HOME/event-gateway/`, `$HOME/.config/event-gateway/`.
    pub fn discover() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|p| p.is_file())
    }

    /// Candidate config locations in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("config").join(CONFIG_FILE),
            PathBuf::from(CONFIG_FILE),
            PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILE),
        ];
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
        }
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join(APP_DIR)
                    .join(CONFIG_FILE),
            );
        }
        paths
    }

    /// Serialize GatewayConfig to TOML string
    pub fn to_toml(config: &GatewayConfig) -> Result<String, ContractError> {
        toml::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize GatewayConfig to JSON string
    pub fn to_json(config: &GatewayConfig) -> Result<String, ContractError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<GatewayConfig, ContractError> {
        let config: GatewayConfig = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    fn resolve_schema_paths(config: &mut GatewayConfig, base: &Path) {
        for path in config.schemas.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
