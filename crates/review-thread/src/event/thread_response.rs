//! Outcomes of API calls, fed back into the thread view.

use crate::model::{Forest, Node, NodeId};

/// What the server answered to a submitted event.
#[derive(Debug, Clone)]
pub enum ThreadResponse {
    /// A full fetch of the thread. Resets the cursor.
    Loaded(Forest),

    /// The canonical representation of a newly created reply.
    ReplyCreated { parent_id: NodeId, reply: Node },

    /// The count and flag after an upvote toggle.
    UpvoteToggled {
        node_id: NodeId,
        upvote_count: u32,
        viewer_has_upvoted: bool,
    },

    /// An upvote toggle did not go through.
    UpvoteFailed { node_id: NodeId },

    /// The canonical representation of an edited node.
    EditSaved(Node),
}
