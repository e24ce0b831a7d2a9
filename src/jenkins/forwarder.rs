//! Authenticating request forwarder for the Jenkins server.
//!
//! For every call: resolve the URL, replace caller authorization with the
//! configured basic credentials, attach a freshly issued crumb, send exactly
//! once, then classify the status. Nothing is retried here.

use super::credentials::{CredentialProvider, StaticCredentials};
use super::crumb::{CrumbIssuer, TokenIssuer};
use super::request::{ForwardResponse, OutboundRequest};
use crate::config::JenkinsConfig;
use crate::errors::{DevopsError, Result};
use bytes::Bytes;
use http::header::AUTHORIZATION;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn, Instrument};
use url::Url;

/// Relays API calls to Jenkins with translated credentials.
///
/// Holds one pooled `reqwest::Client`; the client is safe to share between
/// concurrent calls and may keep idle connections alive between them.
pub struct JenkinsForwarder {
    server: String,
    timeout: Duration,
    client: Client,
    credentials: Option<Arc<dyn CredentialProvider>>,
    token_issuer: Option<Arc<dyn TokenIssuer>>,
}

impl JenkinsForwarder {
    pub fn new(server: &str, timeout: Duration) -> Result<Self> {
        Url::parse(server).map_err(|e| {
            DevopsError::config(format!("Invalid Jenkins server URL '{}': {}", server, e))
        })?;

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DevopsError::internal(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            timeout,
            client,
            credentials: None,
            token_issuer: None,
        })
    }

    /// Build from configuration; `None` when no Jenkins server is configured.
    pub fn from_config(config: &JenkinsConfig) -> Result<Option<Self>> {
        let Some(server) = config.server.as_deref() else {
            return Ok(None);
        };

        let mut forwarder = Self::new(server, config.timeout())?;

        if let Some(credentials) = StaticCredentials::from_config(config) {
            let credentials: Arc<dyn CredentialProvider> = Arc::new(credentials);
            if config.crumb_enabled {
                let issuer = CrumbIssuer::new(server, credentials.clone(), config.timeout())?;
                forwarder = forwarder.with_token_issuer(Arc::new(issuer));
            }
            forwarder = forwarder.with_credentials(credentials);
        }

        Ok(Some(forwarder))
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Only consulted when credentials are configured.
    pub fn with_token_issuer(mut self, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        self.token_issuer = Some(token_issuer);
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Join the server address and `path`, then append `query` to any query
    /// string the path already carries.
    pub fn resolve_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        if !path.is_empty() && !path.starts_with('/') {
            return Err(DevopsError::config(format!(
                "Jenkins request path '{}' must start with '/'",
                path
            )));
        }
        let raw = format!("{}{}", self.server, path);

        let mut url = Url::parse(&raw).map_err(|e| {
            DevopsError::config(format!("Invalid Jenkins request path '{}': {}", path, e))
        })?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// Forward one request and return the raw response when the status is below 400.
    pub async fn forward(&self, path: &str, request: OutboundRequest) -> Result<ForwardResponse> {
        let span = crate::forward_span!(request.method, path);
        self.forward_inner(path, request).instrument(span).await
    }

    /// Like [`forward`](Self::forward) but only returns the body.
    pub async fn forward_body(&self, path: &str, request: OutboundRequest) -> Result<Bytes> {
        self.forward(path, request).await.map(|response| response.body)
    }

    async fn forward_inner(&self, path: &str, request: OutboundRequest) -> Result<ForwardResponse> {
        let OutboundRequest { method, mut headers, query, body, form } = request;

        let url = self.resolve_url(path, &query)?;

        if let Some(credentials) = &self.credentials {
            // Replaces any bearer token the caller sent
            headers.insert(AUTHORIZATION, credentials.basic_auth().header_value()?);

            if let Some(issuer) = &self.token_issuer {
                if let Some(token) = issuer.issue_token().await? {
                    let (name, value) = token.into_header()?;
                    headers.insert(name, value);
                }
            }
        }

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if !form.is_empty() {
            builder = builder.form(&form);
        } else if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request to Jenkins timed out after {}s", self.timeout.as_secs())
            } else if e.is_connect() {
                "Failed to connect to Jenkins".to_string()
            } else {
                "Request to Jenkins failed".to_string()
            };
            warn!(method = %method, path = %path, "{}", message);
            DevopsError::transport_with_source(message, e)
        })?;

        let status = response.status();
        let response_headers = response.headers().clone();
        // Consumes the response; the connection is released on every path below
        let body = response.bytes().await.map_err(|e| {
            warn!(method = %method, path = %path, status = status.as_u16(), "Failed to read Jenkins response body");
            DevopsError::transport_with_source("Failed to read Jenkins response body", e)
        })?;

        debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            body_length = body.len(),
            "Jenkins request completed"
        );

        if status.as_u16() >= 400 {
            warn!(method = %method, path = %path, status = status.as_u16(), "Jenkins returned an error status");
            return Err(DevopsError::remote_service(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        Ok(ForwardResponse { status, headers: response_headers, body })
    }
}

impl std::fmt::Debug for JenkinsForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JenkinsForwarder")
            .field("server", &self.server)
            .field("timeout", &self.timeout)
            .field("credentials", &self.credentials.is_some())
            .field("token_issuer", &self.token_issuer.is_some())
            .finish()
    }
}
