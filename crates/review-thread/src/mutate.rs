//! Pure, ancestor-copy-on-write updates of a forest.
//!
//! Every operation returns a new [`Forest`] and leaves its input untouched.
//! Only the mutated node and its ancestors are copied; every other subtree is
//! shared with the input, so `Arc::ptr_eq` on the old and new node tells a
//! renderer exactly which parts changed.

use crate::error::{Result, ThreadError};
use crate::index::CommentIndex;
use crate::model::{Forest, Node, NodeId, UserId};
use crate::path::trace;
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of a successful mutation.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// The updated snapshot.
    pub forest: Forest,
    /// Ids whose node identity differs from the input forest.
    pub changed: HashSet<NodeId>,
}

impl Mutation {
    /// Whether the node with `id` was replaced by this mutation.
    pub fn touched(&self, id: &NodeId) -> bool {
        self.changed.contains(id)
    }
}

/// Append `reply` as the last child of `parent_id`.
///
/// The reply's `parent_id` is set to `parent_id`. Fails with
/// [`ThreadError::ParentNotFound`] if the parent is absent and with
/// [`ThreadError::DuplicateId`] if the reply, or any reply nested inside it,
/// reuses an id. Nested replies must name their enclosing node as parent.
pub fn append_reply(forest: &Forest, parent_id: &NodeId, reply: Node) -> Result<Mutation> {
    let index = CommentIndex::build(forest)?;
    let added = incoming_ids(&index, &reply)?;

    let reply = Arc::new(reply.with_parent(parent_id.clone()));
    let mut mutation = rewrite(&index, parent_id, |parent| parent.children.push(reply))
        .map_err(|err| match err {
            ThreadError::NodeNotFound { id } => ThreadError::ParentNotFound { id },
            other => other,
        })?;
    mutation.changed.extend(added);

    log::debug!("Appended reply under {}", parent_id);
    Ok(mutation)
}

/// Ids of `reply` and everything nested in it, checked against `index`.
fn incoming_ids(index: &CommentIndex, reply: &Node) -> Result<Vec<NodeId>> {
    let mut ids = vec![reply.id.clone()];
    let mut seen: HashSet<&NodeId> = HashSet::from([&reply.id]);
    if index.contains(&reply.id) {
        return Err(ThreadError::DuplicateId {
            id: reply.id.clone(),
        });
    }

    let mut stack: Vec<(&Node, &Arc<Node>)> =
        reply.children.iter().map(|child| (reply, child)).collect();
    while let Some((parent, node)) = stack.pop() {
        if index.contains(&node.id) || !seen.insert(&node.id) {
            return Err(ThreadError::DuplicateId {
                id: node.id.clone(),
            });
        }
        match &node.parent_id {
            Some(declared) if declared == &parent.id => {}
            Some(declared) => {
                return Err(ThreadError::MisplacedNode {
                    id: node.id.clone(),
                    parent_id: declared.clone(),
                    nested_under: parent.id.clone(),
                })
            }
            None => {
                return Err(ThreadError::Detached {
                    id: node.id.clone(),
                })
            }
        }
        ids.push(node.id.clone());
        stack.extend(node.children.iter().map(|child| (&**node, child)));
    }
    Ok(ids)
}

/// Flip the viewer's upvote on a node and adjust its count by one.
///
/// Applying it twice with the same viewer restores the original node, as long
/// as the count includes the viewer's own vote.
pub fn toggle_upvote(forest: &Forest, node_id: &NodeId, viewer: UserId) -> Result<Mutation> {
    let index = CommentIndex::build(forest)?;
    let node = index
        .get(node_id)
        .ok_or_else(|| ThreadError::NodeNotFound { id: node_id.clone() })?;
    if node.is_authored_by(viewer) {
        return Err(ThreadError::SelfUpvote { id: node_id.clone() });
    }

    rewrite(&index, node_id, |node| {
        if node.viewer_has_upvoted {
            node.upvote_count = node.upvote_count.saturating_sub(1);
        } else {
            node.upvote_count = node.upvote_count.saturating_add(1);
        }
        node.viewer_has_upvoted = !node.viewer_has_upvoted;
    })
}

/// Replace a node's text and mark it edited.
pub fn edit_content(
    forest: &Forest,
    node_id: &NodeId,
    content: impl Into<String>,
) -> Result<Mutation> {
    let index = CommentIndex::build(forest)?;
    let content = content.into();
    rewrite(&index, node_id, |node| {
        node.content = content;
        node.is_edited = true;
    })
}

/// Set the upvote count and flag the server reported for a node.
pub fn apply_upvote_state(
    forest: &Forest,
    node_id: &NodeId,
    upvote_count: u32,
    viewer_has_upvoted: bool,
) -> Result<Mutation> {
    let index = CommentIndex::build(forest)?;
    rewrite(&index, node_id, |node| {
        node.upvote_count = upvote_count;
        node.viewer_has_upvoted = viewer_has_upvoted;
    })
}

/// Overwrite a node's fields with the server's canonical copy, keeping its replies.
pub fn reconcile(forest: &Forest, canonical: Node) -> Result<Mutation> {
    let index = CommentIndex::build(forest)?;
    let id = canonical.id.clone();
    rewrite(&index, &id, |node| {
        let children = std::mem::take(&mut node.children);
        let parent_id = node.parent_id.take();
        *node = Node {
            children,
            parent_id,
            ..canonical
        };
    })
}

/// Apply `update` to a copy of `target`, then copy each ancestor up to the root.
fn rewrite(
    index: &CommentIndex,
    target: &NodeId,
    update: impl FnOnce(&mut Node),
) -> Result<Mutation> {
    let path = trace(index, target)?;
    let Some((node, ancestors)) = path.split_last() else {
        return Err(ThreadError::NodeNotFound { id: target.clone() });
    };

    let mut changed = HashSet::with_capacity(path.len());
    let mut copy = Node::clone(node);
    update(&mut copy);
    changed.insert(copy.id.clone());
    let mut replacement = Arc::new(copy);

    for ancestor in ancestors.iter().rev() {
        let mut copy = Node::clone(ancestor);
        let slot = copy
            .children
            .iter_mut()
            .find(|child| child.id == replacement.id)
            .ok_or_else(|| ThreadError::OrphanedNode {
                id: replacement.id.clone(),
                parent_id: ancestor.id.clone(),
            })?;
        *slot = replacement;
        changed.insert(copy.id.clone());
        replacement = Arc::new(copy);
    }

    Ok(Mutation {
        forest: Forest::from_root(replacement),
        changed,
    })
}
