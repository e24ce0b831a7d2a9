//! Basic-auth credentials for the Jenkins server.

use crate::config::JenkinsConfig;
use crate::errors::{DevopsError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::HeaderValue;
use std::fmt;
use zeroize::Zeroizing;

/// Username/secret pair. The secret is wiped from memory on drop.
#[derive(Clone)]
pub struct BasicCredential {
    username: String,
    secret: Zeroizing<String>,
}

impl BasicCredential {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { username: username.into(), secret: Zeroizing::new(secret.into()) }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// `Basic base64(username:secret)`, flagged sensitive so it is never printed.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let pair = Zeroizing::new(format!("{}:{}", self.username, self.secret.as_str()));
        let encoded = Zeroizing::new(STANDARD.encode(pair.as_bytes()));
        let mut value = HeaderValue::from_str(&format!("Basic {}", encoded.as_str()))
            .map_err(|e| DevopsError::config(format!("Invalid basic auth header: {}", e)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BasicCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredential")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Supplies the basic-auth pair used for every forwarded call.
pub trait CredentialProvider: Send + Sync {
    fn basic_auth(&self) -> BasicCredential;
}

/// Credentials fixed at startup from configuration
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credential: BasicCredential,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { credential: BasicCredential::new(username, secret) }
    }

    /// `None` unless both username and password are configured
    pub fn from_config(config: &JenkinsConfig) -> Option<Self> {
        config.basic_auth().map(|(username, password)| Self::new(username, password))
    }
}

impl CredentialProvider for StaticCredentials {
    fn basic_auth(&self) -> BasicCredential {
        self.credential.clone()
    }
}
