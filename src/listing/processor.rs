//! The list pipeline: filter, stable sort, transform, paginate.

use super::compare::{CompareChain, CompareKey};
use super::filter::{matches_all, Filter};
use super::query::QueryDescriptor;
use crate::domain::Resource;
use crate::errors::{DevopsError, Result};
use serde::Serialize;

/// One page of results plus the number of resources that passed the filters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<R> {
    pub items: Vec<R>,
    pub total_items: usize,
}

/// Per-kind list strategies: ordering, filtering and an optional per-item transform.
pub trait ListHandler<R: Resource> {
    /// Resource kind used in error messages and spans
    fn kind(&self) -> &'static str;

    /// Chain used when the query names no sort field
    fn default_chain(&self) -> CompareChain {
        CompareChain::default_list_order()
    }

    /// Sort keys this kind can be ordered by
    fn supports(&self, key: CompareKey) -> bool {
        let _ = key;
        true
    }

    fn filter(&self, resource: &R, filters: &[Filter]) -> bool {
        matches_all(resource, filters)
    }

    fn transform(&self, resource: R) -> R {
        resource
    }

    /// Resolve the chain for a query, rejecting keys this kind does not carry.
    fn comparator(&self, descriptor: &QueryDescriptor) -> Result<CompareChain> {
        match descriptor.sort {
            None => Ok(self.default_chain()),
            Some((key, direction)) if self.supports(key) => {
                Ok(CompareChain::sorted_by(key, direction))
            }
            Some((key, _)) => Err(DevopsError::config(format!(
                "sort field '{}' is not supported for {}",
                key,
                self.kind()
            ))),
        }
    }
}

/// Run a list query over a snapshot of resources.
///
/// The input is never mutated; resources on the returned page are clones.
/// Resources that tie on every key keep their input order.
pub fn process<R, H>(
    resources: &[R],
    descriptor: &QueryDescriptor,
    handler: &H,
) -> Result<ListResult<R>>
where
    R: Resource + Clone,
    H: ListHandler<R> + ?Sized,
{
    let chain = handler.comparator(descriptor)?;

    let mut selected: Vec<&R> =
        resources.iter().filter(|resource| handler.filter(resource, &descriptor.filters)).collect();

    // slice::sort_by is stable
    selected.sort_by(|left, right| chain.sort_order(*left, *right));

    let total_items = selected.len();
    let items = descriptor
        .pagination
        .apply(selected.into_iter().map(|resource| handler.transform(resource.clone())))
        .collect();

    tracing::debug!(
        kind = handler.kind(),
        input = resources.len(),
        total_items,
        "processed list query"
    );

    Ok(ListResult { items, total_items })
}
