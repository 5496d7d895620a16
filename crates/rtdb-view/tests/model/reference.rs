//! NodeRef tests.

use std::collections::HashSet;

use rtdb_view::reference::NodeRef;

#[test]
fn parse_ignores_empty_segments() {
    assert_eq!(NodeRef::parse(""), NodeRef::root());
    assert_eq!(NodeRef::parse("//"), NodeRef::root());
    assert_eq!(NodeRef::parse("/a//b/"), NodeRef::parse("a/b"));
}

#[test]
fn display_and_debug() {
    assert_eq!(NodeRef::root().to_string(), "/");
    assert_eq!(NodeRef::parse("users/alice").to_string(), "/users/alice");
    assert_eq!(format!("{:?}", NodeRef::parse("/x")), "NodeRef(/x)");
}

#[test]
fn navigation() {
    let alice = NodeRef::root().child("users").child("alice");

    assert_eq!(alice.key(), Some("alice"));
    assert_eq!(alice.parent(), Some(NodeRef::parse("/users")));
    assert_eq!(NodeRef::root().key(), None);
    assert_eq!(NodeRef::root().parent(), None);
    assert!(NodeRef::root().is_root());
    assert_eq!(alice.segments(), ["users", "alice"]);
}

#[test]
fn contains_is_ancestor_or_self() {
    let users = NodeRef::parse("/users");

    assert!(users.contains(&users));
    assert!(users.contains(&NodeRef::parse("/users/alice/age")));
    assert!(NodeRef::root().contains(&users));
    assert!(!users.contains(&NodeRef::parse("/usersx")));
    assert!(!users.contains(&NodeRef::root()));
}

#[test]
fn equal_locations_hash_alike() {
    let mut set = HashSet::new();
    set.insert(NodeRef::parse("/a/b"));
    set.insert(NodeRef::root().child("a").child("b"));
    assert_eq!(set.len(), 1);
}
