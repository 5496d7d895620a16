//! QueryChannel tests.

use std::sync::{Arc, Mutex};

use rtdb_view::pipeline::QueryChannel;
use rtdb_view::query::{Query, QueryParams};
use rtdb_view::reactive::Observable;

#[test]
fn starts_at_default() {
    let channel = QueryChannel::new();
    assert_eq!(channel.latest(), Query::Default);
}

#[test]
fn new_subscribers_get_latest_push() {
    let channel = QueryChannel::new();
    channel.push(QueryParams::with_limit(10).into());
    channel.push(QueryParams::with_limit(20).into());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let seen = Arc::clone(&seen);
        channel.subscribe(move |q: &Query| seen.lock().unwrap().push(q.limit()))
    };

    assert_eq!(*seen.lock().unwrap(), vec![Some(20)]);
}

#[test]
fn identical_pushes_are_all_delivered() {
    let channel = QueryChannel::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let seen = Arc::clone(&seen);
        channel.subscribe(move |q: &Query| seen.lock().unwrap().push(q.clone()))
    };

    let q: Query = QueryParams::with_limit(5).into();
    channel.push(q.clone());
    channel.push(q.clone());

    assert_eq!(*seen.lock().unwrap(), vec![Query::Default, q.clone(), q]);
}

#[test]
fn clones_share_one_stream() {
    let channel = QueryChannel::new();
    let other = channel.clone();

    other.push(QueryParams::default().into());

    assert_eq!(channel.latest(), Query::Params(QueryParams::default()));
    assert!(!channel.latest().is_default());
}
