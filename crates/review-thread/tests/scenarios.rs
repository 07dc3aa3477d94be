//! End-to-end thread scenarios against the public API.

use pretty_assertions::assert_eq;
use review_thread::{
    deep_link, mutate, trace, Author, CommentIndex, Forest, Node, NodeId, ThreadCursor,
    ThreadError, ThreadViewState, UserId,
};
use std::sync::Arc;

fn node(id: &str, author: u64) -> Node {
    Node::new(NodeId::from(id), Author::new(author, format!("user{author}")), id)
}

/// R with C1, and C2 holding C3.
fn forest() -> Forest {
    Forest::new(node("review-r", 1).with_replies([
        node("c1", 2),
        node("c2", 3).with_replies([node("c3", 4)]),
    ]))
}

fn ids(path: &[Arc<Node>]) -> Vec<&str> {
    path.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn deep_link_then_manual_navigation() {
    let forest = forest();

    let resolution = deep_link::resolve(&forest, &NodeId::from("c3")).unwrap();
    assert_eq!(ids(resolution.cursor().breadcrumb()), vec!["review-r", "c2", "c3"]);

    let index = CommentIndex::build(&forest).unwrap();
    let mut cursor = ThreadCursor::new(&index);
    cursor.open(&index, &NodeId::from("c2")).unwrap();
    cursor.back(&index).unwrap();
    assert!(cursor.is_at_root());
    assert_eq!(ids(cursor.breadcrumb()), vec!["review-r"]);
}

#[test]
fn appended_reply_is_traceable() {
    let forest = forest();
    let result = mutate::append_reply(&forest, &NodeId::from("c2"), node("c4", 5)).unwrap();

    let index = CommentIndex::build(&result.forest).unwrap();
    let path = trace(&index, &NodeId::from("c4")).unwrap();
    assert_eq!(ids(&path), vec!["review-r", "c2", "c4"]);

    let c2 = index.get(&NodeId::from("c2")).unwrap();
    let hits = c2.children.iter().filter(|n| n.id.as_str() == "c4").count();
    assert_eq!(hits, 1);
}

#[test]
fn dead_deep_link_returns_to_root() {
    let resolution = deep_link::resolve(&forest(), &NodeId::from("nonexistent")).unwrap();
    assert!(!resolution.is_found());
    assert!(resolution.cursor().is_at_root());
}

#[test]
fn root_traces_to_itself() {
    let forest = forest();
    let index = CommentIndex::build(&forest).unwrap();
    assert_eq!(ids(&trace(&index, forest.root_id()).unwrap()), vec!["review-r"]);
}

#[test]
fn mutual_parents_are_reported() {
    let mut a = node("a", 2);
    a.parent_id = Some(NodeId::from("b"));
    let mut b = node("b", 3);
    b.parent_id = Some(NodeId::from("a"));
    let mut root = node("review-r", 1);
    root.children = vec![Arc::new(a), Arc::new(b)];
    let forest = Forest::new(root);

    let err = deep_link::resolve(&forest, &NodeId::from("b")).unwrap_err();
    assert!(matches!(err, ThreadError::CyclicReference { .. }));
    assert!(err.is_structural());
}

#[test]
fn self_upvote_leaves_forest_unchanged() {
    let forest = forest();
    let before = forest.find(&NodeId::from("c3")).cloned().unwrap();

    let err = mutate::toggle_upvote(&forest, &NodeId::from("c3"), UserId(4)).unwrap_err();
    assert_eq!(err, ThreadError::SelfUpvote { id: NodeId::from("c3") });
    assert!(Arc::ptr_eq(&before, forest.find(&NodeId::from("c3")).unwrap()));
}

#[test]
fn edit_keeps_sibling_identity() {
    let forest = forest();
    let result = mutate::edit_content(&forest, &NodeId::from("c1"), "edited").unwrap();

    let old_c2 = forest.find(&NodeId::from("c2")).unwrap();
    let new_c2 = result.forest.find(&NodeId::from("c2")).unwrap();
    assert!(Arc::ptr_eq(old_c2, new_c2));
    assert!(!Arc::ptr_eq(forest.root(), result.forest.root()));
}

#[test]
fn misnested_reply_is_refused() {
    // x is listed under c1 but its parent link names c2
    let mut x = node("x", 5);
    x.parent_id = Some(NodeId::from("c2"));
    let mut c1 = node("c1", 2).with_parent(NodeId::from("review-r"));
    c1.children.push(Arc::new(x));
    let mut root = node("review-r", 1).with_replies([node("c2", 3)]);
    root.children.insert(0, Arc::new(c1));
    let forest = Forest::new(root);

    let err = ThreadViewState::new(forest.clone(), Some(UserId(9))).unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(err, ThreadError::MisplacedNode { .. }));
    assert!(deep_link::resolve(&forest, &NodeId::from("x")).is_err());
}
