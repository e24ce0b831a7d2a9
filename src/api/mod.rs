//! # REST API Components
//!
//! Thin axum layer over the list pipeline and the Jenkins forwarder: KubeSphere
//! style list endpoints, single template lookup and a Jenkins pass-through.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
