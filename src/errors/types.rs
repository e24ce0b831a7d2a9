//! # Error Types
//!
//! Error taxonomy for the DevOps API server using `thiserror`.

/// Custom result type for DevOps API server operations
pub type Result<T> = std::result::Result<T, DevopsError>;

/// Main error type for the DevOps API server
#[derive(thiserror::Error, Debug)]
pub enum DevopsError {
    /// Malformed query descriptors, base URLs or configuration values
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-level failure reaching the remote system
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The remote system answered with a status >= 400
    #[error("Remote service error (status {code}): {message}")]
    RemoteService { code: u16, message: String },

    /// Freshness token acquisition failed; no request was sent
    #[error("Token issuance error: {message}")]
    TokenIssuance {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} '{name}'")]
    NotFound { resource_type: String, name: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: String,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Internal server errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DevopsError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport { message: message.into(), source: None }
    }

    /// Create a transport error wrapping the underlying HTTP client error
    pub fn transport_with_source<S: Into<String>>(message: S, source: reqwest::Error) -> Self {
        Self::Transport { message: message.into(), source: Some(source) }
    }

    /// Create a remote service error from a status code and raw body
    pub fn remote_service<S: Into<String>>(code: u16, message: S) -> Self {
        Self::RemoteService { code, message: message.into() }
    }

    /// Create a token issuance error
    pub fn token_issuance<S: Into<String>>(message: S) -> Self {
        Self::TokenIssuance { message: message.into(), source: None }
    }

    /// Create a token issuance error with source
    pub fn token_issuance_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::TokenIssuance { message: message.into(), source: Some(source) }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, N: Into<String>>(resource_type: R, name: N) -> Self {
        Self::NotFound { resource_type: resource_type.into(), name: name.into() }
    }

    /// Create an internal server error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DevopsError::Config { .. } => 400,
            DevopsError::NotFound { .. } => 404,
            DevopsError::Transport { .. } => 502,
            DevopsError::TokenIssuance { .. } => 502,
            DevopsError::RemoteService { code, .. } => *code,
            DevopsError::Serialization { .. } => 500,
            DevopsError::Io { .. } => 500,
            DevopsError::Internal { .. } => 500,
        }
    }

    /// Check if a caller may reasonably retry. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            DevopsError::Transport { .. } => true,
            DevopsError::RemoteService { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for DevopsError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for DevopsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "JSON serialization failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DevopsError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "YAML deserialization failed".to_string(),
        }
    }
}

impl From<config::ConfigError> for DevopsError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for DevopsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Validation failed: {}", message))
    }
}
