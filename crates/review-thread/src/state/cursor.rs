//! Focus, breadcrumb and visible replies within one thread.

use crate::error::{Result, ThreadError};
use crate::index::CommentIndex;
use crate::model::{Node, NodeId};
use crate::path::trace;
use std::sync::Arc;

/// What the thread view currently has open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    /// The review itself, no comment selected.
    #[default]
    Root,
    /// A comment and its replies.
    Comment(NodeId),
}

/// Navigation state within one review thread.
///
/// The breadcrumb always starts at the review root and ends at the focused
/// node. Visible children are the focused node's replies as of the last
/// recomputation.
#[derive(Debug, Clone)]
pub struct ThreadCursor {
    focus: Focus,
    breadcrumb: Vec<Arc<Node>>,
    visible_children: Vec<Arc<Node>>,
}

impl ThreadCursor {
    /// Cursor focused on the review root.
    pub fn new(index: &CommentIndex) -> Self {
        let root = Arc::clone(index.root());
        Self {
            focus: Focus::Root,
            visible_children: root.children.clone(),
            breadcrumb: vec![root],
        }
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Id of the focused node (the root id when on the review).
    pub fn focus_id(&self) -> &NodeId {
        &self.focus_node().id
    }

    /// The focused node.
    pub fn focus_node(&self) -> &Arc<Node> {
        // The breadcrumb is never empty
        &self.breadcrumb[self.breadcrumb.len() - 1]
    }

    pub fn breadcrumb(&self) -> &[Arc<Node>] {
        &self.breadcrumb
    }

    pub fn visible_children(&self) -> &[Arc<Node>] {
        &self.visible_children
    }

    pub fn is_at_root(&self) -> bool {
        self.focus == Focus::Root
    }

    /// Open a node: the root returns to the review, anything else focuses that comment.
    ///
    /// Fails with [`ThreadError::NodeNotFound`] if `id` is not in the index,
    /// leaving the cursor where it was.
    pub fn open(&mut self, index: &CommentIndex, id: &NodeId) -> Result<()> {
        if id == index.root_id() {
            self.reset(index);
            return Ok(());
        }

        let path = trace(index, id)?;
        if path.is_empty() {
            return Err(ThreadError::NodeNotFound { id: id.clone() });
        }
        self.focus_path(path);
        Ok(())
    }

    /// Step out of the focused comment.
    ///
    /// Moves to the parent comment, or to the root when the parent is the
    /// review or the focused node no longer exists. Returns `false` when
    /// already at the root; leaving the review is up to the caller.
    pub fn back(&mut self, index: &CommentIndex) -> Result<bool> {
        let Focus::Comment(id) = &self.focus else {
            return Ok(false);
        };

        let parent_id = index.get(id).and_then(|node| node.parent_id.clone());
        match parent_id {
            Some(parent_id) if &parent_id != index.root_id() && index.contains(&parent_id) => {
                self.open(index, &parent_id)?;
            }
            _ => self.reset(index),
        }
        Ok(true)
    }

    /// Return to the review root. Used whenever the forest is replaced.
    pub fn reset(&mut self, index: &CommentIndex) {
        *self = Self::new(index);
    }

    /// Recompute breadcrumb and children against a newer index, keeping the focus.
    ///
    /// A focus that vanished from the forest falls back to the root.
    pub fn refresh(&mut self, index: &CommentIndex) -> Result<()> {
        match self.focus.clone() {
            Focus::Root => self.reset(index),
            Focus::Comment(id) => {
                let path = trace(index, &id)?;
                if path.is_empty() {
                    log::debug!("Focused comment {} vanished, returning to root", id);
                    self.reset(index);
                } else {
                    self.focus_path(path);
                }
            }
        }
        Ok(())
    }

    /// Focus the last node of an already traced, non-empty root-to-node path.
    pub(crate) fn focus_path(&mut self, path: Vec<Arc<Node>>) {
        let Some(target) = path.last() else {
            return;
        };
        self.focus = if target.is_root() {
            Focus::Root
        } else {
            Focus::Comment(target.id.clone())
        };
        self.visible_children = target.children.clone();
        self.breadcrumb = path;
    }
}
