//! Query parameters shared by the list endpoints.

use serde::Deserialize;

use crate::errors::Result;
use crate::listing::{Filter, QueryDescriptor};

/// `?name=&label=k=v&annotation=k=v&sortBy=&ascending=&limit=&offset=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Substring match on the resource name
    pub name: Option<String>,
    /// `key=value` label selector
    pub label: Option<String>,
    /// `key=value` annotation selector
    pub annotation: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub ascending: bool,
    /// Page size; absent means everything after `offset`
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl ListParams {
    /// Build the query descriptor, rejecting malformed selectors and unknown sort fields.
    pub fn into_descriptor(self) -> Result<QueryDescriptor> {
        let mut descriptor = QueryDescriptor::new().with_pagination(self.limit, self.offset);

        if let Some(name) = self.name.filter(|name| !name.is_empty()) {
            descriptor = descriptor.with_filter(Filter::Name(name));
        }
        if let Some(selector) = self.label.as_deref() {
            descriptor = descriptor.with_filter(Filter::label(selector)?);
        }
        if let Some(selector) = self.annotation.as_deref() {
            descriptor = descriptor.with_filter(Filter::annotation(selector)?);
        }
        if let Some(field) = self.sort_by.as_deref().filter(|field| !field.is_empty()) {
            descriptor = descriptor.sort_by(field, self.ascending)?;
        }

        Ok(descriptor)
    }
}
