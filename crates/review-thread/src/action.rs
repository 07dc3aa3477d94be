//! Thread View Actions
//!
//! Tagged actions the thread view can process. The hosting UI maps clicks,
//! keys or route parameters to these and dispatches them to
//! [`crate::ThreadViewState::handle_action`].

use crate::model::NodeId;

/// Actions that can be performed on a review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadAction {
    // === Navigation ===
    /// Open a node (the review root or a comment)
    Open(NodeId),
    /// Step out of the focused comment
    Back,
    /// Jump straight to a comment, e.g. from a notification
    DeepLink(NodeId),

    // === Mutations ===
    /// Reply to the focused node
    Reply(String),
    /// Toggle the viewer's upvote on a node
    ToggleUpvote(NodeId),
    /// Replace a node's text
    Edit { node_id: NodeId, content: String },

    // === Rendering ===
    /// The renderer scrolled to a deep-linked node
    ScrollCompleted(NodeId),

    // === General ===
    /// Ask for a fresh copy of the thread
    Reload,
    /// Leave the thread view
    Close,
}

impl ThreadAction {
    /// Check if this action only moves the cursor
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            ThreadAction::Open(_) | ThreadAction::Back | ThreadAction::DeepLink(_)
        )
    }

    /// Check if this action changes thread content
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ThreadAction::Reply(_) | ThreadAction::ToggleUpvote(_) | ThreadAction::Edit { .. }
        )
    }
}
