//! # Configuration Management
//!
//! Layered configuration: built-in defaults, an optional config file, then
//! environment variables prefixed with `DEVOPS` (nested keys separated by `__`,
//! e.g. `DEVOPS__JENKINS__SERVER`).

pub mod settings;

pub use settings::{
    AppConfig, JenkinsConfig, ObservabilityConfig, ServerConfig, StoreConfig,
    MAX_JENKINS_TIMEOUT_SECONDS,
};

use crate::errors::Result;
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DEVOPS";

impl AppConfig {
    /// Load configuration from an optional file and the environment, then validate it
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
