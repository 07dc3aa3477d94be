//! Main state for the thread view.

use super::{Focus, ThreadCursor};
use crate::action::ThreadAction;
use crate::deep_link::{resolve_in, Resolution, ScrollTarget};
use crate::error::{Result, ThreadError};
use crate::event::{ThreadEvent, ThreadResponse};
use crate::index::CommentIndex;
use crate::model::{Forest, Node, NodeId, UserId};
use crate::mutate::{self, Mutation};
use std::collections::HashSet;
use std::sync::Arc;

/// Behaviour switches for the thread view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadSettings {
    /// Apply upvotes and edits locally before the server confirms them.
    pub optimistic_updates: bool,
}

impl Default for ThreadSettings {
    fn default() -> Self {
        Self {
            optimistic_updates: true,
        }
    }
}

/// Main state for one open review thread.
///
/// Owns the current forest snapshot, its index and the cursor. The index is
/// rebuilt from the latest forest after every mutation.
#[derive(Debug, Clone)]
pub struct ThreadViewState {
    forest: Forest,
    index: CommentIndex,
    cursor: ThreadCursor,
    /// Signed-in viewer, `None` for anonymous browsing.
    viewer: Option<UserId>,
    settings: ThreadSettings,
    /// Deep-link target the renderer has not scrolled to yet.
    pending_scroll: Option<ScrollTarget>,
    /// Ids replaced by the last mutation.
    last_changed: HashSet<NodeId>,
}

impl ThreadViewState {
    /// Create a thread view focused on the review root.
    pub fn new(forest: Forest, viewer: Option<UserId>) -> Result<Self> {
        let index = CommentIndex::build(&forest)?;
        let cursor = ThreadCursor::new(&index);
        Ok(Self {
            forest,
            index,
            cursor,
            viewer,
            settings: ThreadSettings::default(),
            pending_scroll: None,
            last_changed: HashSet::new(),
        })
    }

    pub fn with_settings(mut self, settings: ThreadSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn index(&self) -> &CommentIndex {
        &self.index
    }

    pub fn cursor(&self) -> &ThreadCursor {
        &self.cursor
    }

    pub fn breadcrumb(&self) -> &[Arc<Node>] {
        self.cursor.breadcrumb()
    }

    pub fn visible_children(&self) -> &[Arc<Node>] {
        self.cursor.visible_children()
    }

    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    pub fn settings(&self) -> ThreadSettings {
        self.settings
    }

    /// Deep-link target still waiting to be scrolled to.
    pub fn pending_scroll(&self) -> Option<&ScrollTarget> {
        self.pending_scroll.as_ref()
    }

    /// Ids whose node identity changed in the last mutation.
    pub fn changed(&self) -> &HashSet<NodeId> {
        &self.last_changed
    }

    /// Swap in a freshly fetched forest and return to the review root.
    ///
    /// A structurally broken forest is refused and the current one kept.
    pub fn replace_forest(&mut self, forest: Forest) -> Result<()> {
        let index = CommentIndex::build(&forest)?;
        self.cursor = ThreadCursor::new(&index);
        self.forest = forest;
        self.index = index;
        self.pending_scroll = None;
        self.last_changed.clear();
        Ok(())
    }

    /// Handle an action, returning any resulting events.
    pub fn handle_action(&mut self, action: ThreadAction) -> Vec<ThreadEvent> {
        log::debug!("Thread action: {:?}", action);
        match action {
            // === Navigation ===
            ThreadAction::Open(id) => match self.cursor.open(&self.index, &id) {
                Ok(()) => vec![self.focus_changed()],
                Err(err) => Self::rejection(err),
            },
            ThreadAction::Back => match self.cursor.back(&self.index) {
                Ok(true) => vec![self.focus_changed()],
                Ok(false) => vec![ThreadEvent::LeaveReview],
                Err(err) => Self::rejection(err),
            },
            ThreadAction::DeepLink(id) => self.follow_deep_link(&id),

            // === Mutations ===
            ThreadAction::Reply(content) => self.start_reply(content),
            ThreadAction::ToggleUpvote(id) => self.start_upvote(&id),
            ThreadAction::Edit { node_id, content } => self.start_edit(node_id, content),

            // === Rendering ===
            ThreadAction::ScrollCompleted(id) => {
                if self
                    .pending_scroll
                    .as_ref()
                    .is_some_and(|scroll| scroll.target == id)
                {
                    self.pending_scroll = None;
                }
                Vec::new()
            }

            // === General ===
            ThreadAction::Reload => vec![ThreadEvent::RefetchRequested],
            ThreadAction::Close => vec![ThreadEvent::LeaveReview],
        }
    }

    /// Feed the outcome of an API call back into the view.
    pub fn handle_response(&mut self, response: ThreadResponse) -> Vec<ThreadEvent> {
        match response {
            ThreadResponse::Loaded(forest) => match self.replace_forest(forest) {
                Ok(()) => vec![self.focus_changed()],
                // Refetching a broken payload again would not help
                Err(err) => {
                    log::warn!("Refusing fetched thread: {}", err);
                    vec![ThreadEvent::Rejected(err)]
                }
            },
            ThreadResponse::ReplyCreated { parent_id, reply } => {
                // A refetch may already have delivered the reply
                let result = if self.index.contains(&reply.id) {
                    mutate::reconcile(&self.forest, reply)
                } else {
                    mutate::append_reply(&self.forest, &parent_id, reply)
                };
                self.apply(result)
            }
            ThreadResponse::UpvoteToggled {
                node_id,
                upvote_count,
                viewer_has_upvoted,
            } => self.apply(mutate::apply_upvote_state(
                &self.forest,
                &node_id,
                upvote_count,
                viewer_has_upvoted,
            )),
            ThreadResponse::UpvoteFailed { node_id } => {
                if !self.settings.optimistic_updates {
                    return Vec::new();
                }
                let Some(viewer) = self.viewer else {
                    return Vec::new();
                };
                log::warn!("Upvote on {} failed, reverting", node_id);
                self.apply(mutate::toggle_upvote(&self.forest, &node_id, viewer))
            }
            ThreadResponse::EditSaved(node) => self.apply(mutate::reconcile(&self.forest, node)),
        }
    }

    fn follow_deep_link(&mut self, id: &NodeId) -> Vec<ThreadEvent> {
        match resolve_in(&self.index, id) {
            Ok(Resolution::Focused { cursor, scroll }) => {
                self.cursor = cursor;
                self.pending_scroll = Some(scroll.clone());
                vec![self.focus_changed(), ThreadEvent::ScrollRequested(scroll)]
            }
            Ok(Resolution::NotFound { cursor, requested }) => {
                self.cursor = cursor;
                self.pending_scroll = None;
                vec![
                    self.focus_changed(),
                    ThreadEvent::DeepLinkMissed { requested },
                ]
            }
            Err(err) => Self::rejection(err),
        }
    }

    fn start_reply(&mut self, content: String) -> Vec<ThreadEvent> {
        let content = content.trim();
        if content.is_empty() {
            log::debug!("Ignoring empty reply");
            return Vec::new();
        }
        vec![ThreadEvent::SubmitReply {
            parent_id: self.cursor.focus_id().clone(),
            content: content.to_string(),
        }]
    }

    fn start_upvote(&mut self, id: &NodeId) -> Vec<ThreadEvent> {
        let Some(viewer) = self.viewer else {
            return Self::rejection(ThreadError::Unauthenticated { id: id.clone() });
        };

        // Run the mutation even when not optimistic so the guards apply
        let mutation = match mutate::toggle_upvote(&self.forest, id, viewer) {
            Ok(mutation) => mutation,
            Err(err) => return Self::rejection(err),
        };

        let submit = ThreadEvent::SubmitUpvote {
            node_id: id.clone(),
        };
        if self.settings.optimistic_updates {
            let mut events = self.apply(Ok(mutation));
            events.push(submit);
            events
        } else {
            vec![submit]
        }
    }

    fn start_edit(&mut self, node_id: NodeId, content: String) -> Vec<ThreadEvent> {
        let mutation = match mutate::edit_content(&self.forest, &node_id, content.clone()) {
            Ok(mutation) => mutation,
            Err(err) => return Self::rejection(err),
        };

        let submit = ThreadEvent::SubmitEdit { node_id, content };
        if self.settings.optimistic_updates {
            let mut events = self.apply(Ok(mutation));
            events.push(submit);
            events
        } else {
            vec![submit]
        }
    }

    /// Install a mutation result, or turn its error into events.
    fn apply(&mut self, result: Result<Mutation>) -> Vec<ThreadEvent> {
        match result.and_then(|mutation| self.commit(mutation)) {
            Ok(event) => vec![event],
            Err(err) => Self::rejection(err),
        }
    }

    fn commit(&mut self, mutation: Mutation) -> Result<ThreadEvent> {
        let index = CommentIndex::build(&mutation.forest)?;
        let mut cursor = self.cursor.clone();
        cursor.refresh(&index)?;

        self.forest = mutation.forest;
        self.index = index;
        self.cursor = cursor;
        self.last_changed = mutation.changed.clone();
        Ok(ThreadEvent::ThreadChanged {
            changed: mutation.changed,
        })
    }

    fn focus_changed(&self) -> ThreadEvent {
        ThreadEvent::FocusChanged {
            focus: self.cursor.focus().clone(),
            breadcrumb: self
                .cursor
                .breadcrumb()
                .iter()
                .map(|node| node.id.clone())
                .collect(),
        }
    }

    fn rejection(err: ThreadError) -> Vec<ThreadEvent> {
        log::warn!("Thread operation rejected: {}", err);
        let refetch = err.is_structural() || err.needs_refetch();
        let mut events = vec![ThreadEvent::Rejected(err)];
        if refetch {
            events.push(ThreadEvent::RefetchRequested);
        }
        events
    }

    /// Whether the cursor is on the review itself.
    pub fn is_at_root(&self) -> bool {
        self.cursor.focus() == &Focus::Root
    }
}
