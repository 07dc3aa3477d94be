//! Glue between the thread view and a [`ReviewApi`]
//!
//! The thread view emits `Submit*` and `RefetchRequested` events; [`ThreadSync`]
//! performs the matching calls and feeds the answers back as
//! [`ThreadResponse`]s.

use crate::client::ReviewApi;
use crate::types::{NewComment, UpvoteTarget};
use anyhow::anyhow;
use review_thread::{NodeId, ThreadEvent, ThreadResponse, ThreadViewState};
use std::collections::VecDeque;

/// Performs the API side of one review thread
pub struct ThreadSync<C> {
    client: C,
    rating_id: u64,
}

impl<C: ReviewApi> ThreadSync<C> {
    pub fn new(client: C, rating_id: u64) -> Self {
        Self { client, rating_id }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Id of the review root this sync serves
    pub fn review_id(&self) -> NodeId {
        NodeId::review(self.rating_id)
    }

    /// Fetch the full thread
    pub async fn load(&self) -> anyhow::Result<ThreadResponse> {
        let rating = self.client.fetch_rating(self.rating_id).await?;
        log::debug!(
            "Fetched rating {} with {} top-level comments",
            rating.id,
            rating.comments.len()
        );
        Ok(ThreadResponse::Loaded(rating.into_forest()))
    }

    /// Perform the API call behind one event.
    ///
    /// Returns `None` for events that need no call, or when a failed call
    /// could not be recovered by refetching.
    pub async fn handle_event(
        &self,
        state: &ThreadViewState,
        event: &ThreadEvent,
    ) -> Option<ThreadResponse> {
        match event {
            ThreadEvent::SubmitReply { parent_id, content } => {
                match self.submit_reply(parent_id, content).await {
                    Ok(response) => Some(response),
                    Err(e) => {
                        log::error!("Failed to post reply to {}: {}", parent_id, e);
                        self.refetch().await
                    }
                }
            }
            ThreadEvent::SubmitUpvote { node_id } => {
                match self.submit_upvote(state, node_id).await {
                    Ok(response) => Some(response),
                    Err(e) => {
                        log::error!("Failed to toggle upvote on {}: {}", node_id, e);
                        Some(ThreadResponse::UpvoteFailed {
                            node_id: node_id.clone(),
                        })
                    }
                }
            }
            ThreadEvent::SubmitEdit { node_id, content } => {
                match self.submit_edit(node_id, content).await {
                    Ok(response) => Some(response),
                    Err(e) => {
                        log::error!("Failed to save edit on {}: {}", node_id, e);
                        self.refetch().await
                    }
                }
            }
            ThreadEvent::RefetchRequested => self.refetch().await,
            _ => None,
        }
    }

    /// Run events through the API until the view settles.
    ///
    /// Returns the events meant for the renderer. At most one refetch is
    /// performed per call.
    pub async fn drive(
        &self,
        state: &mut ThreadViewState,
        events: Vec<ThreadEvent>,
    ) -> Vec<ThreadEvent> {
        let mut queue: VecDeque<ThreadEvent> = events.into();
        let mut rendered = Vec::new();
        let mut refetched = false;

        while let Some(event) = queue.pop_front() {
            if !event.is_submission() {
                rendered.push(event);
                continue;
            }
            if matches!(event, ThreadEvent::RefetchRequested) {
                if refetched {
                    log::debug!("Skipping repeated refetch");
                    continue;
                }
                refetched = true;
            }

            if let Some(response) = self.handle_event(state, &event).await {
                if matches!(response, ThreadResponse::Loaded(_)) {
                    refetched = true;
                }
                queue.extend(state.handle_response(response));
            }
        }

        rendered
    }

    async fn refetch(&self) -> Option<ThreadResponse> {
        match self.load().await {
            Ok(response) => Some(response),
            Err(e) => {
                log::error!("Failed to refetch rating {}: {}", self.rating_id, e);
                None
            }
        }
    }

    async fn submit_reply(&self, parent_id: &NodeId, content: &str) -> anyhow::Result<ThreadResponse> {
        let parent_comment = if parent_id.is_review() {
            None
        } else {
            Some(
                parent_id
                    .server_id()
                    .ok_or_else(|| anyhow!("Cannot reply to unsaved node {}", parent_id))?,
            )
        };

        let created = self
            .client
            .create_comment(NewComment {
                rating: self.rating_id,
                parent_comment,
                content: content.to_string(),
            })
            .await?;

        Ok(ThreadResponse::ReplyCreated {
            parent_id: parent_id.clone(),
            reply: created.into_node(&self.review_id()),
        })
    }

    async fn submit_upvote(
        &self,
        state: &ThreadViewState,
        node_id: &NodeId,
    ) -> anyhow::Result<ThreadResponse> {
        let target = UpvoteTarget::from_node_id(node_id)
            .ok_or_else(|| anyhow!("Cannot upvote unsaved node {}", node_id))?;
        let answer = self.client.toggle_upvote(target).await?;

        // Without a reported flag, assume the toggle did what the view expects
        let viewer_has_upvoted = answer.has_upvoted.unwrap_or_else(|| {
            let current = state
                .index()
                .get(node_id)
                .is_some_and(|node| node.viewer_has_upvoted);
            if state.settings().optimistic_updates {
                current
            } else {
                !current
            }
        });

        Ok(ThreadResponse::UpvoteToggled {
            node_id: node_id.clone(),
            upvote_count: answer.upvotes,
            viewer_has_upvoted,
        })
    }

    async fn submit_edit(&self, node_id: &NodeId, content: &str) -> anyhow::Result<ThreadResponse> {
        let server_id = node_id
            .server_id()
            .ok_or_else(|| anyhow!("Cannot edit unsaved node {}", node_id))?;

        let node = if node_id.is_review() {
            let rating = self.client.edit_rating(server_id, content).await?;
            let forest = rating.into_forest();
            forest.root().as_ref().clone()
        } else {
            let comment = self.client.edit_comment(server_id, content).await?;
            comment.into_node(&self.review_id())
        };

        Ok(ThreadResponse::EditSaved(node))
    }
}
