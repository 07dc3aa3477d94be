//! Review and comment nodes, unified as one shape for traversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Prefix that distinguishes the review root from comment ids in one index.
pub const REVIEW_ID_PREFIX: &str = "review-";

/// Opaque identifier of a node, unique within one forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthetic id for the review (rating) root.
    pub fn review(rating_id: impl fmt::Display) -> Self {
        Self(format!("{REVIEW_ID_PREFIX}{rating_id}"))
    }

    /// Id for a comment as numbered by the server.
    pub fn comment(comment_id: impl fmt::Display) -> Self {
        Self(comment_id.to_string())
    }

    /// Whether this is a synthetic review id.
    pub fn is_review(&self) -> bool {
        self.0.starts_with(REVIEW_ID_PREFIX)
    }

    /// The server-side number behind this id, if it has one.
    pub fn server_id(&self) -> Option<u64> {
        self.0
            .strip_prefix(REVIEW_ID_PREFIX)
            .unwrap_or(&self.0)
            .parse()
            .ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Server-side user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Authoritative identity, used for the self-upvote guard.
    pub id: UserId,
    /// Display name only.
    pub handle: String,
}

impl Author {
    pub fn new(id: u64, handle: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            handle: handle.into(),
        }
    }
}

/// A review or a comment.
///
/// Children are shared through `Arc` so that a mutated forest can reuse every
/// subtree that did not change. Whether a subtree changed is answered by
/// [`Arc::ptr_eq`] on the old and new node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Enclosing node; `None` only for the review root.
    pub parent_id: Option<NodeId>,
    pub author: Author,
    /// Text body, may be empty for a review without free text.
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Set once the content changed after creation.
    pub is_edited: bool,
    pub upvote_count: u32,
    /// Only meaningful when a viewer is signed in.
    pub viewer_has_upvoted: bool,
    /// Optional attachment, passed through unexamined.
    pub image_url: Option<String>,
    /// Review-only attributes (score, dosage, brand, conditions), passed through unexamined.
    pub payload: Option<serde_json::Value>,
    /// Direct replies in insertion order.
    pub children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a parentless node with no replies.
    pub fn new(id: NodeId, author: Author, content: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            author,
            content: content.into(),
            created_at: Utc::now(),
            is_edited: false,
            upvote_count: 0,
            viewer_has_upvoted: false,
            image_url: None,
            payload: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_upvotes(mut self, count: u32, viewer_has_upvoted: bool) -> Self {
        self.upvote_count = count;
        self.viewer_has_upvoted = viewer_has_upvoted;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach replies, pointing each reply's `parent_id` at this node.
    pub fn with_replies(mut self, replies: impl IntoIterator<Item = Node>) -> Self {
        for reply in replies {
            self.children
                .push(Arc::new(reply.with_parent(self.id.clone())));
        }
        self
    }

    /// Whether this node has no parent (the review root).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Number of direct replies.
    pub fn reply_count(&self) -> usize {
        self.children.len()
    }

    /// Whether `viewer` wrote this node.
    pub fn is_authored_by(&self, viewer: UserId) -> bool {
        self.author.id == viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_and_comment_ids() {
        let review = NodeId::review(12);
        assert_eq!(review.as_str(), "review-12");
        assert!(review.is_review());
        assert_eq!(review.server_id(), Some(12));

        let comment = NodeId::comment(34);
        assert_eq!(comment.as_str(), "34");
        assert!(!comment.is_review());
        assert_eq!(comment.server_id(), Some(34));

        assert_eq!(NodeId::from("c1").server_id(), None);
    }

    #[test]
    fn test_with_replies_sets_parent() {
        let root = Node::new(NodeId::review(1), Author::new(1, "ana"), "").with_replies([
            Node::new(NodeId::comment(2), Author::new(2, "bo"), "hi"),
            Node::new(NodeId::comment(3), Author::new(3, "cy"), "yo"),
        ]);

        assert!(root.is_root());
        assert_eq!(root.reply_count(), 2);
        for child in &root.children {
            assert_eq!(child.parent_id.as_ref(), Some(&root.id));
        }
    }

    #[test]
    fn test_is_authored_by() {
        let node = Node::new(NodeId::comment(5), Author::new(9, "dee"), "text");
        assert!(node.is_authored_by(UserId(9)));
        assert!(!node.is_authored_by(UserId(10)));
    }
}
