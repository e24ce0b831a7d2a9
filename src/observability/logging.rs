//! # Structured Logging
//!
//! Subscriber setup and span macros built on the tracing ecosystem.
//!
//! Forwarded Jenkins calls are logged by method, path and status only. Request
//! and response bodies, `Authorization` values and crumb values never reach the
//! log output.

use crate::config::{AppConfig, ObservabilityConfig};
use crate::errors::{DevopsError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Create a tracing span for a list query.
///
/// ```rust,ignore
/// let span = list_span!("pipelineruns", "project-a");
/// ```
#[macro_export]
macro_rules! list_span {
    ($resource:expr, $namespace:expr) => {
        tracing::info_span!(
            "list_resources",
            resource = %$resource,
            namespace = %$namespace,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($resource:expr, $namespace:expr, $($field:tt)*) => {
        tracing::info_span!(
            "list_resources",
            resource = %$resource,
            namespace = %$namespace,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for a call forwarded to Jenkins
#[macro_export]
macro_rules! forward_span {
    ($method:expr, $path:expr) => {
        tracing::debug_span!(
            "jenkins_forward",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            DevopsError::config(format!("Invalid log level '{}': {}", config.log_level, e))
        })?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logging {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| DevopsError::internal(format!("Failed to install subscriber: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    let jenkins_host = config
        .jenkins
        .server
        .as_deref()
        .and_then(|server| url::Url::parse(server).ok())
        .map(|url| match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), url.host_str().unwrap_or_default(), port),
            None => format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default()),
        });
    tracing::info!(
        service_name = %config.observability.service_name,
        server_address = %config.server.bind_address(),
        jenkins_host = ?jenkins_host,
        jenkins_auth = config.jenkins.basic_auth().is_some(),
        crumb_enabled = config.jenkins.crumb_enabled,
        manifest_path = ?config.store.manifest_path,
        "DevOps API server configuration"
    );
}
