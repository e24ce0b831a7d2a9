//! Anti-forgery tokens ("crumbs") required by Jenkins for state-changing calls.

use super::credentials::CredentialProvider;
use crate::errors::{DevopsError, Result};
use async_trait::async_trait;
use http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Jenkins endpoint that hands out crumbs
pub const CRUMB_ISSUER_PATH: &str = "/crumbIssuer/api/json";

/// Header name/value pair attached to exactly one outgoing request
#[derive(Clone, PartialEq, Eq)]
pub struct FreshnessToken {
    pub header_name: String,
    pub value: String,
}

impl FreshnessToken {
    pub fn new(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { header_name: header_name.into(), value: value.into() }
    }

    /// Validated header pair; the value is flagged sensitive.
    pub fn into_header(self) -> Result<(HeaderName, HeaderValue)> {
        let name = HeaderName::from_bytes(self.header_name.as_bytes()).map_err(|e| {
            DevopsError::token_issuance(format!(
                "Invalid token header name '{}': {}",
                self.header_name, e
            ))
        })?;
        let mut value = HeaderValue::from_str(&self.value).map_err(|e| {
            DevopsError::token_issuance(format!("Invalid token header value: {}", e))
        })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for FreshnessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreshnessToken")
            .field("header_name", &self.header_name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Issues one freshness token per forwarded call.
///
/// `Ok(None)` means the remote side does not require a token.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(&self) -> Result<Option<FreshnessToken>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrumbResponse {
    crumb_request_field: String,
    crumb: String,
}

/// Fetches crumbs from the Jenkins crumb issuer using the forwarder's credentials.
pub struct CrumbIssuer {
    endpoint: Url,
    credentials: Arc<dyn CredentialProvider>,
    client: Client,
}

impl CrumbIssuer {
    pub fn new(
        server: &str,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}{}", server.trim_end_matches('/'), CRUMB_ISSUER_PATH))
            .map_err(|e| {
                DevopsError::config(format!("Invalid crumb issuer URL for '{}': {}", server, e))
            })?;

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DevopsError::internal(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { endpoint, credentials, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TokenIssuer for CrumbIssuer {
    async fn issue_token(&self) -> Result<Option<FreshnessToken>> {
        let authorization = self.credentials.basic_auth().header_value()?;

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                DevopsError::token_issuance_with_source("Failed to request crumb", Box::new(e))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Crumb issuer not available, CSRF protection disabled");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DevopsError::token_issuance(format!(
                "Crumb issuer returned status {}",
                status.as_u16()
            )));
        }

        let crumb: CrumbResponse = response.json().await.map_err(|e| {
            DevopsError::token_issuance_with_source("Malformed crumb response", Box::new(e))
        })?;

        Ok(Some(FreshnessToken::new(crumb.crumb_request_field, crumb.crumb)))
    }
}
