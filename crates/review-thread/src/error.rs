//! Error kinds produced by the threading engine.

use crate::model::NodeId;
use thiserror::Error;

/// Errors that can occur while indexing, tracing or mutating a thread.
///
/// Every variant is a value handed back to the caller. "Not found" results of
/// [`crate::trace`] and [`crate::deep_link::resolve`] are not errors and do not
/// appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThreadError {
    /// Two nodes in one forest share an id.
    #[error("Duplicate node id in thread: {id}")]
    DuplicateId { id: NodeId },

    /// Following parent links from a node never reaches a root.
    #[error("Parent chain starting at {id} does not terminate")]
    CyclicReference { id: NodeId },

    /// A node names a parent that is not part of the forest.
    #[error("Node {id} references missing parent {parent_id}")]
    OrphanedNode { id: NodeId, parent_id: NodeId },

    /// A node is nested under one node but names another as its parent.
    #[error("Node {id} is nested under {nested_under} but names {parent_id} as parent")]
    MisplacedNode {
        id: NodeId,
        parent_id: NodeId,
        nested_under: NodeId,
    },

    /// A parent chain ends at a parentless node other than the review root.
    #[error("Node {id} is detached from the review root")]
    Detached { id: NodeId },

    /// A reply targets a parent absent from the current forest.
    #[error("Parent not found: {id}")]
    ParentNotFound { id: NodeId },

    /// A mutation or navigation targets a node absent from the current forest.
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// The viewer tried to upvote their own review or comment.
    #[error("You cannot upvote your own post ({id})")]
    SelfUpvote { id: NodeId },

    /// An upvote was requested without a signed-in viewer.
    #[error("Sign in required to upvote {id}")]
    Unauthenticated { id: NodeId },
}

impl ThreadError {
    /// Whether the error means the forest itself cannot be trusted.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ThreadError::DuplicateId { .. }
                | ThreadError::CyclicReference { .. }
                | ThreadError::OrphanedNode { .. }
                | ThreadError::MisplacedNode { .. }
                | ThreadError::Detached { .. }
        )
    }

    /// Whether the caller should refetch the forest before retrying.
    pub fn needs_refetch(&self) -> bool {
        matches!(
            self,
            ThreadError::ParentNotFound { .. } | ThreadError::NodeNotFound { .. }
        )
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ThreadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        let id = NodeId::comment(7);
        assert!(ThreadError::DuplicateId { id: id.clone() }.is_structural());
        assert!(ThreadError::CyclicReference { id: id.clone() }.is_structural());
        assert!(ThreadError::Detached { id: id.clone() }.is_structural());
        assert!(ThreadError::MisplacedNode {
            id: id.clone(),
            parent_id: NodeId::comment(1),
            nested_under: NodeId::comment(2),
        }
        .is_structural());
        assert!(!ThreadError::NodeNotFound { id: id.clone() }.is_structural());
        assert!(!ThreadError::SelfUpvote { id }.is_structural());
    }

    #[test]
    fn test_refetch_classification() {
        let id = NodeId::comment(3);
        assert!(ThreadError::ParentNotFound { id: id.clone() }.needs_refetch());
        assert!(ThreadError::NodeNotFound { id: id.clone() }.needs_refetch());
        assert!(!ThreadError::SelfUpvote { id: id.clone() }.needs_refetch());
        assert!(!ThreadError::DuplicateId { id }.needs_refetch());
    }

    #[test]
    fn test_error_messages() {
        let err = ThreadError::NodeNotFound {
            id: NodeId::comment(42),
        };
        assert_eq!(err.to_string(), "Node not found: 42");

        let err = ThreadError::OrphanedNode {
            id: NodeId::comment(2),
            parent_id: NodeId::comment(9),
        };
        assert_eq!(err.to_string(), "Node 2 references missing parent 9");
    }
}
