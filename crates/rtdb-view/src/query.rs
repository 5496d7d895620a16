//! Query intents pushed by the presentation layer.
//!
//! `Query::Default` is the distinguished "no explicit filtering" value. A
//! `Query::Params` whose fields are all unset is content-equal to it but is
//! still a deliberate query: pagination UI treats it as active.

use std::num::NonZeroUsize;

/// Child ordering passed through to the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderBy {
    Key,
    Value,
    Child(String),
}

/// Pagination and filter fields of an explicit query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pub limit: Option<NonZeroUsize>,
    pub order_by: Option<OrderBy>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

impl QueryParams {
    /// Params with only a limit set. A zero limit is treated as unset.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: NonZeroUsize::new(limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Query {
    #[default]
    Default,
    Params(QueryParams),
}

impl Query {
    pub fn is_default(&self) -> bool {
        matches!(self, Query::Default)
    }

    pub fn params(&self) -> Option<&QueryParams> {
        match self {
            Query::Default => None,
            Query::Params(params) => Some(params),
        }
    }

    /// Explicit limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.params()
            .and_then(|p| p.limit)
            .map(NonZeroUsize::get)
    }

    /// Limit to request from the store: the explicit limit or `page_size`.
    pub fn effective_limit(&self, page_size: usize) -> usize {
        self.limit().unwrap_or(page_size)
    }
}

impl From<QueryParams> for Query {
    fn from(params: QueryParams) -> Self {
        Query::Params(params)
    }
}
