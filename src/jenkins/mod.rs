//! # Jenkins Forwarding
//!
//! Relays API calls to the Jenkins server. The caller's bearer token is
//! replaced by the configured basic credentials, a crumb is attached when the
//! server issues one, and any status >= 400 becomes
//! [`DevopsError::RemoteService`](crate::errors::DevopsError::RemoteService).

pub mod credentials;
pub mod crumb;
pub mod forwarder;
pub mod request;

pub use credentials::{BasicCredential, CredentialProvider, StaticCredentials};
pub use crumb::{CrumbIssuer, FreshnessToken, TokenIssuer, CRUMB_ISSUER_PATH};
pub use forwarder::JenkinsForwarder;
pub use request::{ForwardResponse, OutboundRequest};
