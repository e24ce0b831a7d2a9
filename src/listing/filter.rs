//! Filter predicates applied before sorting.

use crate::domain::Resource;
use crate::errors::{DevopsError, Result};

/// A single predicate; a resource is kept only when it matches every filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Name contains the given substring
    Name(String),
    /// Label `key` is present with exactly `value`
    Label { key: String, value: String },
    /// Annotation `key` is present with exactly `value`
    Annotation { key: String, value: String },
}

impl Filter {
    /// Parse a `key=value` label selector
    pub fn label(selector: &str) -> Result<Self> {
        let (key, value) = split_selector("label", selector)?;
        Ok(Filter::Label { key, value })
    }

    /// Parse a `key=value` annotation selector
    pub fn annotation(selector: &str) -> Result<Self> {
        let (key, value) = split_selector("annotation", selector)?;
        Ok(Filter::Annotation { key, value })
    }

    pub fn matches<R: Resource + ?Sized>(&self, resource: &R) -> bool {
        let meta = resource.metadata();
        match self {
            Filter::Name(substring) => meta.name.contains(substring.as_str()),
            Filter::Label { key, value } => meta.labels.get(key) == Some(value),
            Filter::Annotation { key, value } => meta.annotations.get(key) == Some(value),
        }
    }
}

fn split_selector(kind: &str, selector: &str) -> Result<(String, String)> {
    match selector.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(DevopsError::config(format!(
            "malformed {} filter '{}', expected key=value",
            kind, selector
        ))),
    }
}

/// Default predicate: every filter must match
pub fn matches_all<R: Resource + ?Sized>(resource: &R, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(resource))
}
