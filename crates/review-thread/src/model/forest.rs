//! A review and all of its comment descendants.

use super::{Node, NodeId};
use std::sync::Arc;

/// Immutable snapshot of one review thread.
///
/// Cloning a forest is cheap; it shares the root. Mutations go through
/// [`crate::mutate`], which returns a new forest and leaves this one untouched.
#[derive(Debug, Clone)]
pub struct Forest {
    root: Arc<Node>,
}

impl Forest {
    /// Create a forest rooted at `root`.
    pub fn new(root: Node) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Create a forest around an already shared root.
    pub fn from_root(root: Arc<Node>) -> Self {
        Self { root }
    }

    /// The review node.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root.id
    }

    /// Depth-first iterator over every node, root first.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A forest always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Linear search for a node. Use [`crate::CommentIndex`] for repeated lookups.
    pub fn find(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.iter().find(|node| &node.id == id)
    }

    /// Whether both forests are the very same snapshot.
    pub fn same_snapshot(&self, other: &Forest) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

/// Pre-order traversal of a forest.
pub struct Nodes<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited first
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
