//! Query descriptor: filters, optional sort field and pagination for one list call.

use super::compare::{CompareKey, Direction};
use super::filter::Filter;
use crate::errors::Result;

/// Offset/limit window applied after filtering, sorting and transformation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// `None` returns everything from `offset` on
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Slice an already ordered sequence. An offset past the end yields an empty page.
    pub fn apply<I: Iterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items.skip(self.offset).take(self.limit.unwrap_or(usize::MAX))
    }
}

/// Per-request list query. Stateless; build one for every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub filters: Vec<Filter>,
    /// `None` selects the handler's default chain
    pub sort: Option<(CompareKey, Direction)>,
    pub pagination: Pagination,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sort by a field name as it appears in `sortBy`; unknown names are a configuration error.
    pub fn sort_by(self, field: &str, ascending: bool) -> Result<Self> {
        let key = field.parse::<CompareKey>()?;
        Ok(self.sort_by_key(key, Direction::from_ascending(ascending)))
    }

    pub fn sort_by_key(mut self, key: CompareKey, direction: Direction) -> Self {
        self.sort = Some((key, direction));
        self
    }

    pub fn with_pagination(mut self, limit: Option<usize>, offset: usize) -> Self {
        self.pagination = Pagination::new(limit, offset);
        self
    }
}
