//! Review API data transfer objects
//!
//! These types mirror the JSON returned by the review REST API. They are kept
//! separate from the engine's [`review_thread::Node`] and converted at the
//! boundary.

use chrono::{DateTime, Utc};
use review_thread::{Author, Forest, Node, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author information embedded in ratings and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID
    pub id: u64,

    /// Display name
    pub username: String,

    /// Avatar URL
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl From<&UserSummary> for Author {
    fn from(user: &UserSummary) -> Self {
        Author::new(user.id, user.username.clone())
    }
}

/// A comment, possibly with nested replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    /// Comment ID
    pub id: u64,

    /// Who wrote it
    pub user: UserSummary,

    /// Comment text
    #[serde(default)]
    pub content: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// Parent comment ID, `None` for a top-level comment on the rating
    #[serde(default)]
    pub parent_comment: Option<u64>,

    /// Whether the text was changed after posting
    #[serde(default)]
    pub is_edited: bool,

    /// Number of upvotes
    #[serde(default)]
    pub upvotes: u32,

    /// Whether the requesting user upvoted it
    #[serde(default)]
    pub has_upvoted: bool,

    /// Attached image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Direct replies
    #[serde(default)]
    pub replies: Vec<CommentDto>,
}

impl CommentDto {
    /// Convert into an engine node; top-level comments hang off `review_id`.
    pub fn into_node(self, review_id: &NodeId) -> Node {
        let id = NodeId::comment(self.id);
        let parent_id = self
            .parent_comment
            .map(NodeId::comment)
            .unwrap_or_else(|| review_id.clone());

        let mut node = Node::new(id, Author::from(&self.user), self.content)
            .with_parent(parent_id)
            .with_created_at(self.created_at)
            .with_upvotes(self.upvotes, self.has_upvoted);
        node.is_edited = self.is_edited;
        node.image_url = self.image_url;

        let replies: Vec<Node> = self
            .replies
            .into_iter()
            .map(|reply| reply.into_node(review_id))
            .collect();
        node.children = replies.into_iter().map(std::sync::Arc::new).collect();
        node
    }
}

/// A rating (review) with its comment thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingDto {
    /// Rating ID
    pub id: u64,

    /// Who wrote the review
    pub user: UserSummary,

    /// Star score
    #[serde(default)]
    pub score: u8,

    /// Free-text review, may be absent
    #[serde(default)]
    pub comment: Option<String>,

    /// When the rating was created
    pub created_at: DateTime<Utc>,

    /// Whether the review was changed after posting
    #[serde(default)]
    pub is_edited: bool,

    /// Number of upvotes
    #[serde(default)]
    pub upvotes: u32,

    /// Whether the requesting user upvoted it
    #[serde(default)]
    pub has_upvoted: bool,

    /// Attached image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Top-level comments
    #[serde(default)]
    pub comments: Vec<CommentDto>,

    /// Remaining attributes (dosage, brand, condition, ...) kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RatingDto {
    /// Id of the review root in the engine.
    pub fn node_id(&self) -> NodeId {
        NodeId::review(self.id)
    }

    /// Convert the rating and its comments into a forest.
    pub fn into_forest(self) -> Forest {
        let review_id = self.node_id();

        let mut payload = self.extra;
        payload.insert("score".to_string(), Value::from(self.score));

        let mut root = Node::new(
            review_id.clone(),
            Author::from(&self.user),
            self.comment.unwrap_or_default(),
        )
        .with_created_at(self.created_at)
        .with_upvotes(self.upvotes, self.has_upvoted)
        .with_payload(Value::Object(payload));
        root.is_edited = self.is_edited;
        root.image_url = self.image_url;

        let comments: Vec<Node> = self
            .comments
            .into_iter()
            .map(|comment| comment.into_node(&review_id))
            .collect();
        root.children = comments.into_iter().map(std::sync::Arc::new).collect();

        Forest::new(root)
    }
}

/// Body of a create-comment request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Rating the comment belongs to
    pub rating: u64,

    /// Comment being replied to, `None` for a top-level comment
    pub parent_comment: Option<u64>,

    /// Comment text (trimmed)
    pub content: String,
}

/// Answer of an upvote toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpvoteResponse {
    /// New upvote count
    #[serde(alias = "upvotes_count")]
    pub upvotes: u32,

    /// New state for the requesting user, if reported
    #[serde(default)]
    pub has_upvoted: Option<bool>,
}

/// Which upvote endpoint a node maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteTarget {
    /// `POST /ratings/{id}/upvote/`
    Rating(u64),
    /// `POST /comments/{id}/upvote/`
    Comment(u64),
}

impl UpvoteTarget {
    /// Map an engine id back to its endpoint, `None` for ids the server never issued.
    pub fn from_node_id(id: &NodeId) -> Option<Self> {
        let server_id = id.server_id()?;
        if id.is_review() {
            Some(UpvoteTarget::Rating(server_id))
        } else {
            Some(UpvoteTarget::Comment(server_id))
        }
    }
}
