//! # DevOps API Server
//!
//! Serves KubeSphere-style DevOps resources (PipelineRuns and Templates) through
//! a sortable, filterable, paginated list API, and relays API calls to a
//! Jenkins server with translated credentials.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API (axum) → ListProcessor → ObjectStore snapshot
//!        ↓
//! JenkinsForwarder → CredentialProvider + TokenIssuer → Jenkins
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use devops_apiserver::domain::PipelineRun;
//! use devops_apiserver::listing::{process, PipelineRunListHandler, QueryDescriptor};
//!
//! # fn main() -> devops_apiserver::Result<()> {
//! let runs = vec![PipelineRun::new("project-a", "build-1")];
//! let descriptor = QueryDescriptor::new().sort_by("runId", false)?;
//! let page = process(&runs, &descriptor, &PipelineRunListHandler::new())?;
//! assert_eq!(page.total_items, 1);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod jenkins;
pub mod listing;
pub mod observability;
pub mod store;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{DevopsError, Result};
pub use observability::init_logging;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
