//! CLI error types

use plancks_gateway::GatewayError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Cluster gateway error
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Some services could not be removed
    #[error("Failed to remove {failed} of {requested} services")]
    RemoveFailed {
        /// Number of failed removals
        failed: usize,
        /// Number of requested removals
        requested: usize,
    },

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
