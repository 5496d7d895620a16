//! Tests for `ReplaySubject<T>` and `Subscription`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rtdb_view::reactive::{Observable, ReplaySubject, Subscription};

fn record(subject: &ReplaySubject<i32>) -> (Arc<Mutex<Vec<i32>>>, Subscription) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sub = {
        let log = Arc::clone(&log);
        subject.subscribe(move |v: &i32| log.lock().unwrap().push(*v))
    };
    (log, sub)
}

#[test]
fn subscribe_replays_latest_value_synchronously() {
    let subject = ReplaySubject::new(1);
    subject.next(2);

    let (log, _sub) = record(&subject);

    assert_eq!(*log.lock().unwrap(), vec![2]);
}

#[test]
fn later_values_arrive_in_order_without_dedup() {
    let subject = ReplaySubject::new(0);
    let (log, _sub) = record(&subject);

    subject.next(5);
    subject.next(5);
    subject.next(7);

    assert_eq!(*log.lock().unwrap(), vec![0, 5, 5, 7]);
    assert_eq!(subject.value(), 7);
}

#[test]
fn unsubscribed_listener_sees_nothing_further() {
    let subject = ReplaySubject::new(0);
    let (log, sub) = record(&subject);

    sub.unsubscribe();
    subject.next(1);

    assert_eq!(*log.lock().unwrap(), vec![0]);
    assert_eq!(subject.listener_count(), 0);
}

#[test]
fn clones_share_value_and_listeners() {
    let subject = ReplaySubject::new(0);
    let other = subject.clone();
    let (log, _sub) = record(&subject);

    other.next(3);

    assert_eq!(*log.lock().unwrap(), vec![0, 3]);
    assert_eq!(subject.value(), 3);
}

// ============================================================================
// Subscription
// ============================================================================

#[test]
fn release_runs_exactly_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let sub = {
        let count = Arc::clone(&count);
        Subscription::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };
    assert!(sub.is_active());

    sub.unsubscribe();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_releases_and_join_releases_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let first = {
        let log = Arc::clone(&log);
        Subscription::new(move || log.lock().unwrap().push("first"))
    };
    let second = {
        let log = Arc::clone(&log);
        Subscription::new(move || log.lock().unwrap().push("second"))
    };

    drop(Subscription::join(first, second));

    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn empty_subscription_is_inactive() {
    let sub = Subscription::empty();
    assert!(!sub.is_active());
    sub.unsubscribe();
}
