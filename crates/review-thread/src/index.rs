//! Flat id lookup over a forest.
//!
//! The index stores every node once, by id, together with the ids of its
//! direct replies. Ancestor walks follow `parent_id` through the index in
//! O(depth); descendant walks follow the child-id lists in O(subtree).

use crate::error::{Result, ThreadError};
use crate::model::{Forest, Node, NodeId};
use crate::path::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// One indexed node.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Shared with the forest, never copied.
    pub node: Arc<Node>,
    /// Ids of direct replies, in order.
    pub children: Vec<NodeId>,
    /// Structural depth, the root is 0.
    pub depth: usize,
}

/// Lookup table from id to node for one forest snapshot.
#[derive(Debug, Clone)]
pub struct CommentIndex {
    root: Arc<Node>,
    entries: HashMap<NodeId, IndexEntry>,
}

impl CommentIndex {
    /// Index every node of `forest`, visiting each exactly once.
    ///
    /// Fails with [`ThreadError::DuplicateId`] if two nodes share an id, and
    /// with a structural error if any node's `parent_id` disagrees with the
    /// node it is nested under.
    pub fn build(forest: &Forest) -> Result<Self> {
        let mut entries = HashMap::new();
        // (node, nested under)
        let mut mismatched: Vec<(Arc<Node>, Option<NodeId>)> = Vec::new();
        let mut stack: Vec<(&Arc<Node>, Option<&NodeId>, usize)> = vec![(forest.root(), None, 0)];

        while let Some((node, nested_under, depth)) = stack.pop() {
            let entry = IndexEntry {
                node: Arc::clone(node),
                children: node.children.iter().map(|c| c.id.clone()).collect(),
                depth,
            };
            if entries.insert(node.id.clone(), entry).is_some() {
                log::warn!("Duplicate node id {} while indexing thread", node.id);
                return Err(ThreadError::DuplicateId {
                    id: node.id.clone(),
                });
            }
            if node.parent_id.as_ref() != nested_under {
                mismatched.push((Arc::clone(node), nested_under.cloned()));
            }
            stack.extend(
                node.children
                    .iter()
                    .map(|child| (child, Some(&node.id), depth + 1)),
            );
        }

        let index = Self {
            root: Arc::clone(forest.root()),
            entries,
        };
        if let Some((node, nested_under)) = mismatched.first() {
            let err = index.link_error(node, nested_under.as_ref());
            log::warn!("Refusing thread under {}: {}", forest.root_id(), err);
            return Err(err);
        }

        log::debug!(
            "Indexed {} nodes under {}",
            index.len(),
            forest.root_id()
        );
        Ok(index)
    }

    /// Classify a node whose `parent_id` disagrees with its nesting.
    fn link_error(&self, node: &Node, nested_under: Option<&NodeId>) -> ThreadError {
        // Following the declared parents tells cycles and dangling links apart
        if let Err(err) = trace(self, &node.id) {
            return err;
        }
        match (&node.parent_id, nested_under) {
            (Some(parent_id), Some(nested_under)) => ThreadError::MisplacedNode {
                id: node.id.clone(),
                parent_id: parent_id.clone(),
                nested_under: nested_under.clone(),
            },
            _ => ThreadError::Detached {
                id: node.id.clone(),
            },
        }
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root.id
    }

    /// The review node.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn get(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.entries.get(id).map(|entry| &entry.node)
    }

    pub fn entry(&self, id: &NodeId) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of indexed nodes including the root.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Structural depth of a node, the root is 0.
    pub fn depth(&self, id: &NodeId) -> Option<usize> {
        self.entries.get(id).map(|entry| entry.depth)
    }

    /// Direct replies of a node, empty if the node is unknown.
    pub fn children_of(&self, id: &NodeId) -> Vec<Arc<Node>> {
        self.entries
            .get(id)
            .map(|entry| {
                entry
                    .children
                    .iter()
                    .filter_map(|child| self.get(child).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of every node below `id` (excluding `id`), pre-order.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let Some(entry) = self.entries.get(id) else {
            return result;
        };

        let mut stack: Vec<&NodeId> = entry.children.iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current.clone());
            if let Some(entry) = self.entries.get(current) {
                stack.extend(entry.children.iter().rev());
            }
        }
        result
    }
}
