//! CLI configuration

use crate::error::CliResult;
use plancks_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cluster gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    /// Load configuration.
    ///
    /// Layers, lowest first: built-in defaults with `DOCKER_HOST` and
    /// `DOCKER_API_VERSION` applied, the optional config file, then
    /// `PLANCKS_<SECTION>__<KEY>` environment variables.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let defaults = CliConfig {
            gateway: GatewayConfig::from_docker_env(),
            logging: LoggingConfig::default(),
        };

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&defaults)?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PLANCKS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
