//! # Error Handling
//!
//! Every failure surfaced by the list pipeline, the Jenkins forwarder and the
//! configuration layer is a [`DevopsError`]. Errors propagate unchanged to the
//! immediate caller; the HTTP layer maps them to responses.

pub mod types;

pub use types::{DevopsError, Result};
