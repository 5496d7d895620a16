//! NodeController tests, run against an in-memory tree.

use std::sync::Arc;

use rtdb_view::error::ViewError;
use rtdb_view::query::{Query, QueryParams};
use rtdb_view::reference::NodeRef;
use rtdb_view::storage::MemoryTree;
use rtdb_view::view::{render_mode, NodeController, RenderMode};
use rtdb_view::{ViewModel, ViewerConfig};
use serde_json::{json, Map, Value};

fn small_pages() -> ViewerConfig {
    ViewerConfig::from_json(r#"{ "defaultPageSize": 2 }"#).unwrap()
}

fn tree() -> Arc<MemoryTree> {
    let mut users = Map::new();
    for name in ["ann", "bob", "cat", "dan", "eve"] {
        users.insert(name.into(), json!({ "name": name }));
    }
    Arc::new(MemoryTree::with_data(json!({
        "users": Value::Object(users),
        "motd": "hello",
    })))
}

#[test]
fn render_mode_follows_leaf_rule() {
    let empty = ViewModel {
        is_loading: false,
        value: None,
        children: Vec::new(),
    };

    assert_eq!(
        render_mode(&empty, &Query::Default),
        RenderMode::Leaf { value: None }
    );
    assert_eq!(
        render_mode(&empty, &QueryParams::with_limit(5).into()),
        RenderMode::Parent {
            children: Vec::new()
        }
    );
}

#[tokio::test]
async fn scalar_node_renders_as_leaf() {
    let controller = NodeController::new(NodeRef::parse("/motd"), tree(), small_pages());

    assert_eq!(
        controller.render(),
        RenderMode::Leaf {
            value: Some(json!("hello"))
        }
    );
    assert!(!controller.is_filtered());
}

#[tokio::test]
async fn load_more_grows_the_page() {
    let controller = NodeController::new(NodeRef::parse("/users"), tree(), small_pages());

    assert_eq!(controller.view_model().children, vec!["ann", "bob"]);
    assert!(controller.has_more());

    controller.load_more().unwrap();
    assert_eq!(controller.query().limit(), Some(4));
    assert!(controller.is_filtered());
    assert_eq!(controller.view_model().children, vec!["ann", "bob", "cat", "dan"]);

    controller.load_more().unwrap();
    assert_eq!(controller.view_model().children.len(), 5);
    assert!(!controller.has_more());
}

#[tokio::test]
async fn child_refs_extend_the_reference() {
    let controller = NodeController::new(NodeRef::parse("/users"), tree(), small_pages());

    assert_eq!(
        controller.child_refs(),
        vec![NodeRef::parse("/users/ann"), NodeRef::parse("/users/bob")]
    );
}

#[tokio::test]
async fn empty_filtered_result_stays_a_parent() {
    let controller = NodeController::new(NodeRef::parse("/nobody"), tree(), small_pages());
    assert!(matches!(controller.render(), RenderMode::Leaf { value: None }));

    controller
        .update_query(Query::Params(QueryParams::default()))
        .unwrap();

    assert_eq!(
        controller.render(),
        RenderMode::Parent {
            children: Vec::new()
        }
    );
}

#[tokio::test]
async fn dispose_rejects_further_queries() {
    let store = tree();
    let controller = NodeController::new(NodeRef::parse("/users"), store.clone(), small_pages());
    assert_eq!(store.listener_count(), 1);

    controller.dispose();

    assert_eq!(store.listener_count(), 0);
    assert!(matches!(controller.load_more(), Err(ViewError::Disposed)));
    assert_eq!(controller.query(), Query::Default);
}
