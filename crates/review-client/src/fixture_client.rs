//! File-backed review API
//!
//! Reads `rating-<id>.json` files from a directory and simulates the server's
//! mutations in memory, so the thread view can run without a backend.

use crate::client::ReviewApi;
use crate::types::{CommentDto, NewComment, RatingDto, UpvoteResponse, UpvoteTarget, UserSummary};
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct FixtureStore {
    ratings: HashMap<u64, RatingDto>,
    next_comment_id: u64,
}

impl FixtureStore {
    fn insert(&mut self, rating: RatingDto) {
        let highest = max_comment_id(&rating.comments);
        self.next_comment_id = self.next_comment_id.max(highest + 1);
        self.ratings.insert(rating.id, rating);
    }

    fn comment_mut(&mut self, comment_id: u64) -> Option<&mut CommentDto> {
        self.ratings
            .values_mut()
            .find_map(|rating| find_comment_mut(&mut rating.comments, comment_id))
    }
}

fn max_comment_id(comments: &[CommentDto]) -> u64 {
    comments
        .iter()
        .map(|c| c.id.max(max_comment_id(&c.replies)))
        .max()
        .unwrap_or(0)
}

fn find_comment_mut(comments: &mut [CommentDto], id: u64) -> Option<&mut CommentDto> {
    for comment in comments.iter_mut() {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Review API backed by JSON fixtures
pub struct FixtureClient {
    dir: PathBuf,
    viewer: UserSummary,
    store: Mutex<FixtureStore>,
}

impl FixtureClient {
    /// Create a client reading fixtures from `dir`, acting as `viewer`
    pub fn new(dir: impl Into<PathBuf>, viewer: UserSummary) -> Self {
        Self {
            dir: dir.into(),
            viewer,
            store: Mutex::new(FixtureStore {
                next_comment_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Create a client over ratings already in memory
    pub fn with_ratings(viewer: UserSummary, ratings: impl IntoIterator<Item = RatingDto>) -> Self {
        let client = Self::new(PathBuf::new(), viewer);
        if let Ok(mut store) = client.store.lock() {
            for rating in ratings {
                store.insert(rating);
            }
        }
        client
    }

    /// Path of the fixture file for a rating
    pub fn fixture_path(&self, rating_id: u64) -> PathBuf {
        self.dir.join(format!("rating-{}.json", rating_id))
    }

    fn store(&self) -> anyhow::Result<MutexGuard<'_, FixtureStore>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("Fixture store lock poisoned"))
    }

    fn read_fixture(path: &Path) -> anyhow::Result<RatingDto> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse fixture: {}", path.display()))
    }
}

#[async_trait]
impl ReviewApi for FixtureClient {
    async fn fetch_rating(&self, rating_id: u64) -> anyhow::Result<RatingDto> {
        let mut store = self.store()?;
        if let Some(rating) = store.ratings.get(&rating_id) {
            log::debug!("Serving rating {} from memory", rating_id);
            return Ok(rating.clone());
        }

        let path = self.fixture_path(rating_id);
        log::info!("Loading rating {} from {}", rating_id, path.display());
        let rating = Self::read_fixture(&path)?;
        store.insert(rating.clone());
        Ok(rating)
    }

    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<CommentDto> {
        let mut store = self.store()?;
        if !store.ratings.contains_key(&comment.rating) {
            bail!("Rating {} not found", comment.rating);
        }

        let id = store.next_comment_id;
        let created = CommentDto {
            id,
            user: self.viewer.clone(),
            content: comment.content,
            created_at: Utc::now(),
            parent_comment: comment.parent_comment,
            is_edited: false,
            upvotes: 0,
            has_upvoted: false,
            image_url: None,
            replies: Vec::new(),
        };

        match comment.parent_comment {
            Some(parent_id) => {
                let parent = store
                    .comment_mut(parent_id)
                    .ok_or_else(|| anyhow!("Parent comment {} not found", parent_id))?;
                parent.replies.push(created.clone());
            }
            None => {
                let rating = store
                    .ratings
                    .get_mut(&comment.rating)
                    .ok_or_else(|| anyhow!("Rating {} not found", comment.rating))?;
                rating.comments.push(created.clone());
            }
        }
        store.next_comment_id = id + 1;

        log::info!("Created comment {} on rating {}", id, comment.rating);
        Ok(created)
    }

    async fn toggle_upvote(&self, target: UpvoteTarget) -> anyhow::Result<UpvoteResponse> {
        let mut store = self.store()?;
        let viewer_id = self.viewer.id;

        let (author_id, upvotes, has_upvoted) = match target {
            UpvoteTarget::Rating(id) => {
                let rating = store
                    .ratings
                    .get_mut(&id)
                    .ok_or_else(|| anyhow!("Rating {} not found", id))?;
                (rating.user.id, &mut rating.upvotes, &mut rating.has_upvoted)
            }
            UpvoteTarget::Comment(id) => {
                let comment = store
                    .comment_mut(id)
                    .ok_or_else(|| anyhow!("Comment {} not found", id))?;
                (comment.user.id, &mut comment.upvotes, &mut comment.has_upvoted)
            }
        };

        if author_id == viewer_id {
            bail!("You cannot upvote your own content");
        }

        *has_upvoted = !*has_upvoted;
        if *has_upvoted {
            *upvotes += 1;
        } else {
            *upvotes = upvotes.saturating_sub(1);
        }

        Ok(UpvoteResponse {
            upvotes: *upvotes,
            has_upvoted: Some(*has_upvoted),
        })
    }

    async fn edit_comment(&self, comment_id: u64, content: &str) -> anyhow::Result<CommentDto> {
        let mut store = self.store()?;
        let viewer_id = self.viewer.id;
        let comment = store
            .comment_mut(comment_id)
            .ok_or_else(|| anyhow!("Comment {} not found", comment_id))?;

        if comment.user.id != viewer_id {
            bail!("Only the author can edit comment {}", comment_id);
        }
        comment.content = content.to_string();
        comment.is_edited = true;
        Ok(comment.clone())
    }

    async fn edit_rating(&self, rating_id: u64, content: &str) -> anyhow::Result<RatingDto> {
        let mut store = self.store()?;
        let viewer_id = self.viewer.id;
        let rating = store
            .ratings
            .get_mut(&rating_id)
            .ok_or_else(|| anyhow!("Rating {} not found", rating_id))?;

        if rating.user.id != viewer_id {
            bail!("Only the author can edit rating {}", rating_id);
        }
        rating.comment = Some(content.to_string());
        rating.is_edited = true;
        Ok(rating.clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn user(id: u64, name: &str) -> UserSummary {
        UserSummary {
            id,
            username: name.to_string(),
            profile_image_url: None,
        }
    }

    pub(crate) fn comment(id: u64, author: UserSummary, parent: Option<u64>) -> CommentDto {
        CommentDto {
            id,
            user: author,
            content: format!("comment {}", id),
            created_at: Utc::now(),
            parent_comment: parent,
            is_edited: false,
            upvotes: 0,
            has_upvoted: false,
            image_url: None,
            replies: Vec::new(),
        }
    }

    /// Rating 1 by ana, comment 10 by bo with reply 11 by ana.
    pub(crate) fn sample_rating() -> RatingDto {
        let mut top = comment(10, user(2, "bo"), None);
        top.replies.push(comment(11, user(1, "ana"), Some(10)));
        RatingDto {
            id: 1,
            user: user(1, "ana"),
            score: 5,
            comment: Some("Great".to_string()),
            created_at: Utc::now(),
            is_edited: false,
            upvotes: 0,
            has_upvoted: false,
            image_url: None,
            comments: vec![top],
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_create_reply_assigns_next_id() {
        let client = FixtureClient::with_ratings(user(1, "ana"), vec![sample_rating()]);

        let created = client
            .create_comment(NewComment {
                rating: 1,
                parent_comment: Some(11),
                content: "thanks".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 12);
        assert_eq!(created.user.username, "ana");

        let rating = client.fetch_rating(1).await.unwrap();
        assert_eq!(rating.comments[0].replies[0].replies[0].id, 12);
    }

    #[tokio::test]
    async fn test_create_top_level_comment() {
        let client = FixtureClient::with_ratings(user(2, "bo"), vec![sample_rating()]);

        client
            .create_comment(NewComment {
                rating: 1,
                parent_comment: None,
                content: "me too".to_string(),
            })
            .await
            .unwrap();

        let rating = client.fetch_rating(1).await.unwrap();
        assert_eq!(rating.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_upvote_round_trip() {
        let client = FixtureClient::with_ratings(user(2, "bo"), vec![sample_rating()]);

        let on = client.toggle_upvote(UpvoteTarget::Rating(1)).await.unwrap();
        assert_eq!(on.upvotes, 1);
        assert_eq!(on.has_upvoted, Some(true));

        let off = client.toggle_upvote(UpvoteTarget::Rating(1)).await.unwrap();
        assert_eq!(off.upvotes, 0);
        assert_eq!(off.has_upvoted, Some(false));
    }

    #[tokio::test]
    async fn test_toggle_upvote_own_comment_rejected() {
        let client = FixtureClient::with_ratings(user(2, "bo"), vec![sample_rating()]);
        assert!(client
            .toggle_upvote(UpvoteTarget::Comment(10))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_edit_requires_author() {
        let client = FixtureClient::with_ratings(user(2, "bo"), vec![sample_rating()]);

        let edited = client.edit_comment(10, "Which dose?").await.unwrap();
        assert!(edited.is_edited);
        assert_eq!(edited.content, "Which dose?");

        assert!(client.edit_comment(11, "hijack").await.is_err());
        assert!(client.edit_rating(1, "hijack").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_from_disk() {
        let dir = std::env::temp_dir().join(format!("review-fixtures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let rating = sample_rating();
        std::fs::write(
            dir.join("rating-1.json"),
            serde_json::to_string(&rating).unwrap(),
        )
        .unwrap();

        let client = FixtureClient::new(&dir, user(2, "bo"));
        let loaded = client.fetch_rating(1).await.unwrap();
        assert_eq!(loaded.comments[0].id, 10);

        assert!(client.fetch_rating(99).await.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
