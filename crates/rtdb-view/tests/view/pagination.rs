//! Pagination helper tests.

use rtdb_view::query::{OrderBy, Query, QueryParams};
use rtdb_view::view::{has_more, load_more};

#[test]
fn full_page_may_have_more() {
    assert!(has_more(50, &Query::Default, 50));
    assert!(!has_more(49, &Query::Default, 50));
    assert!(has_more(10, &QueryParams::with_limit(10).into(), 50));
    assert!(!has_more(0, &QueryParams::with_limit(10).into(), 50));
}

#[test]
fn load_more_adds_a_page_to_the_default_limit() {
    let next = load_more(&Query::Default, 50);
    assert_eq!(next, Query::from(QueryParams::with_limit(100)));
}

#[test]
fn load_more_keeps_other_params() {
    let query = Query::Params(QueryParams {
        order_by: Some(OrderBy::Child("age".into())),
        start_at: Some("20".into()),
        ..QueryParams::with_limit(30)
    });

    let next = load_more(&query, 25);

    let params = next.params().unwrap();
    assert_eq!(next.limit(), Some(55));
    assert_eq!(params.order_by, Some(OrderBy::Child("age".into())));
    assert_eq!(params.start_at.as_deref(), Some("20"));
    assert_eq!(params.end_at, None);
}

#[test]
fn load_more_from_empty_params_stays_explicit() {
    let next = load_more(&Query::Params(QueryParams::default()), 10);
    assert!(!next.is_default());
    assert_eq!(next.limit(), Some(20));
}
