//! Pagination decisions for parent nodes.

use std::num::NonZeroUsize;

use crate::query::{Query, QueryParams};

/// Whether another page may exist: the current page came back full.
pub fn has_more(children_len: usize, query: &Query, page_size: usize) -> bool {
    children_len >= query.effective_limit(page_size)
}

/// The query fetching one more page than `query`.
///
/// Keeps every other parameter. The result is always an explicit query, so
/// the node stays rendered as a parent even if the larger page is empty.
pub fn load_more(query: &Query, page_size: usize) -> Query {
    let next = query.effective_limit(page_size) + page_size;
    let params = query.params().cloned().unwrap_or_default();
    Query::Params(QueryParams {
        limit: NonZeroUsize::new(next),
        ..params
    })
}
