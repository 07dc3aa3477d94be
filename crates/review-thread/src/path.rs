//! Root-to-node paths by following parent links.

use crate::error::{Result, ThreadError};
use crate::index::CommentIndex;
use crate::model::{Node, NodeId};
use std::sync::Arc;

/// Ordered path from the review root to `target`.
///
/// Returns an empty path when `target` is not in the index; a deep link to a
/// deleted comment is expected and not an error. Malformed parent links are
/// reported instead of followed forever: more hops than the index has entries
/// yield [`ThreadError::CyclicReference`].
pub fn trace(index: &CommentIndex, target: &NodeId) -> Result<Vec<Arc<Node>>> {
    let Some(mut current) = index.get(target) else {
        log::debug!("Trace target {} not in thread", target);
        return Ok(Vec::new());
    };

    let mut path = vec![Arc::clone(current)];
    let budget = index.len();

    while let Some(parent_id) = &current.parent_id {
        if path.len() >= budget {
            log::warn!("Parent chain from {} exceeds {} hops", target, budget);
            return Err(ThreadError::CyclicReference { id: target.clone() });
        }
        let parent = index
            .get(parent_id)
            .ok_or_else(|| ThreadError::OrphanedNode {
                id: current.id.clone(),
                parent_id: parent_id.clone(),
            })?;
        path.push(Arc::clone(parent));
        current = parent;
    }

    if &current.id != index.root_id() {
        return Err(ThreadError::Detached { id: target.clone() });
    }

    path.reverse();
    Ok(path)
}

/// Like [`trace`], reduced to ids.
pub fn trace_ids(index: &CommentIndex, target: &NodeId) -> Result<Vec<NodeId>> {
    Ok(trace(index, target)?
        .iter()
        .map(|node| node.id.clone())
        .collect())
}
