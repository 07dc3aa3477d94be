//! Events emitted by the thread view for the hosting application to handle.

use crate::deep_link::ScrollTarget;
use crate::error::ThreadError;
use crate::model::NodeId;
use crate::state::Focus;
use std::collections::HashSet;

/// Events emitted by [`crate::ThreadViewState`].
///
/// The thread view never talks to the network. Events that start with
/// `Submit` ask the host to call the matching API operation and feed the
/// outcome back as a [`super::ThreadResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadEvent {
    /// The cursor moved.
    FocusChanged {
        focus: Focus,
        /// Root-to-focus ids.
        breadcrumb: Vec<NodeId>,
    },

    /// Scroll to and highlight a deep-linked node once it is rendered.
    ScrollRequested(ScrollTarget),

    /// A deep link named a comment that is not in this thread.
    DeepLinkMissed { requested: NodeId },

    /// Create a reply on the server.
    SubmitReply { parent_id: NodeId, content: String },

    /// Toggle an upvote on the server.
    SubmitUpvote { node_id: NodeId },

    /// Save an edit on the server.
    SubmitEdit { node_id: NodeId, content: String },

    /// The forest was replaced by a mutation; these ids have new identities.
    ThreadChanged { changed: HashSet<NodeId> },

    /// The thread is stale or untrustworthy; fetch it again.
    RefetchRequested,

    /// An action was refused.
    Rejected(ThreadError),

    /// Back was pressed on the review itself.
    LeaveReview,
}

impl ThreadEvent {
    /// Whether the host has to call the API for this event.
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            ThreadEvent::SubmitReply { .. }
                | ThreadEvent::SubmitUpvote { .. }
                | ThreadEvent::SubmitEdit { .. }
                | ThreadEvent::RefetchRequested
        )
    }
}
