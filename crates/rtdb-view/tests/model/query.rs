//! Query tests.

use rtdb_view::query::{OrderBy, Query, QueryParams};

#[test]
fn default_is_distinct_from_empty_params() {
    let empty = Query::Params(QueryParams::default());

    assert!(Query::Default.is_default());
    assert!(!empty.is_default());
    assert_ne!(Query::Default, empty);
    assert_eq!(Query::default(), Query::Default);
}

#[test]
fn effective_limit_falls_back_to_page_size() {
    assert_eq!(Query::Default.effective_limit(50), 50);
    assert_eq!(Query::Params(QueryParams::default()).effective_limit(50), 50);

    let limited: Query = QueryParams::with_limit(7).into();
    assert_eq!(limited.limit(), Some(7));
    assert_eq!(limited.effective_limit(50), 7);
}

#[test]
fn zero_limit_is_unset() {
    let query: Query = QueryParams::with_limit(0).into();
    assert_eq!(query.limit(), None);
    assert_eq!(query.effective_limit(25), 25);
}

#[test]
fn params_are_exposed_for_explicit_queries() {
    let query = Query::Params(QueryParams {
        order_by: Some(OrderBy::Value),
        end_at: Some("m".into()),
        ..Default::default()
    });

    let params = query.params().unwrap();
    assert_eq!(params.order_by, Some(OrderBy::Value));
    assert_eq!(params.end_at.as_deref(), Some("m"));
    assert!(Query::Default.params().is_none());
}
