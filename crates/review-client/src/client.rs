//! Review API collaborator trait
//!
//! The engine never talks to the network. Whatever backs the thread view
//! (the REST API, a fixture directory, a test double) implements
//! [`ReviewApi`].

use crate::types::{CommentDto, NewComment, RatingDto, UpvoteResponse, UpvoteTarget};
use async_trait::async_trait;

/// Review API client trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch a rating with its full comment tree
    async fn fetch_rating(&self, rating_id: u64) -> anyhow::Result<RatingDto>;

    /// Create a comment or reply, returning the server's canonical copy
    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<CommentDto>;

    /// Toggle the requesting user's upvote on a rating or comment
    async fn toggle_upvote(&self, target: UpvoteTarget) -> anyhow::Result<UpvoteResponse>;

    /// Replace a comment's text
    async fn edit_comment(&self, comment_id: u64, content: &str) -> anyhow::Result<CommentDto>;

    /// Replace a rating's review text
    async fn edit_rating(&self, rating_id: u64, content: &str) -> anyhow::Result<RatingDto>;
}
