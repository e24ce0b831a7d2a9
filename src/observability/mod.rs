//! # Observability Infrastructure
//!
//! Structured logging for the DevOps API server.

pub mod logging;

pub use logging::{init_logging, log_config_info};
