//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// No configuration file given and none found in the standard locations
    #[error("No configuration file found; searched: {searched}")]
    ConfigNotFound { searched: String },

    /// Configuration file given but missing
    #[error("Configuration file not found: {path}")]
    ConfigMissing { path: String },

    /// Listener could not be bound
    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    /// HTTP server stopped with an error
    #[error("Server error: {message}")]
    Server { message: String },
}

impl CliError {
    pub fn config_not_found(searched: &[std::path::PathBuf]) -> Self {
        Self::ConfigNotFound {
            searched: searched
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn config_missing(path: impl Into<String>) -> Self {
        Self::ConfigMissing { path: path.into() }
    }

    pub fn bind(addr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bind {
            addr: addr.into(),
            message: message.into(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}
