//! Outbound request and raw response types for the forwarder.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::fmt;

/// Everything the caller wants relayed, minus the target path
#[derive(Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub headers: HeaderMap,
    /// Merged into the resolved URL's query string
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
    /// URL-encoded form fields; take precedence over `body` when non-empty
    pub form: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            form: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }
}

impl Default for OutboundRequest {
    fn default() -> Self {
        Self::get()
    }
}

// Header values and bodies may carry credentials
impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("query", &self.query)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .field("form_fields", &self.form.len())
            .finish()
    }
}

/// Successful (< 400) response, returned verbatim
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}
