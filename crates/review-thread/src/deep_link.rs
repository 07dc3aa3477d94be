//! Open a thread directly at a specific comment.

use crate::error::Result;
use crate::index::CommentIndex;
use crate::model::{Forest, NodeId};
use crate::path::trace;
use crate::state::ThreadCursor;

/// Where the renderer should scroll once the target's elements exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    /// The linked node.
    pub target: NodeId,
    /// Root-to-target ids, for expanding or highlighting along the way.
    pub path: Vec<NodeId>,
}

/// Result of resolving a deep link.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The target exists; the cursor is focused on it.
    Focused {
        cursor: ThreadCursor,
        scroll: ScrollTarget,
    },
    /// The target is not in this thread; the cursor is on the root.
    NotFound {
        cursor: ThreadCursor,
        requested: NodeId,
    },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Focused { .. })
    }

    pub fn cursor(&self) -> &ThreadCursor {
        match self {
            Resolution::Focused { cursor, .. } | Resolution::NotFound { cursor, .. } => cursor,
        }
    }

    pub fn into_cursor(self) -> ThreadCursor {
        match self {
            Resolution::Focused { cursor, .. } | Resolution::NotFound { cursor, .. } => cursor,
        }
    }

    pub fn scroll_target(&self) -> Option<&ScrollTarget> {
        match self {
            Resolution::Focused { scroll, .. } => Some(scroll),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Build the navigation state a user would reach by clicking down to `target`.
pub fn resolve(forest: &Forest, target: &NodeId) -> Result<Resolution> {
    let index = CommentIndex::build(forest)?;
    resolve_in(&index, target)
}

/// [`resolve`] against an index that is already built.
pub fn resolve_in(index: &CommentIndex, target: &NodeId) -> Result<Resolution> {
    let path = trace(index, target)?;
    let mut cursor = ThreadCursor::new(index);

    if path.is_empty() {
        log::warn!("Deep link to {} not found under {}", target, index.root_id());
        return Ok(Resolution::NotFound {
            cursor,
            requested: target.clone(),
        });
    }

    let scroll = ScrollTarget {
        target: target.clone(),
        path: path.iter().map(|node| node.id.clone()).collect(),
    };
    cursor.focus_path(path);
    Ok(Resolution::Focused { cursor, scroll })
}

/// Pick the loaded thread that contains `target`, searching all depths.
pub fn find_containing<'a, I>(forests: I, target: &NodeId) -> Option<&'a Forest>
where
    I: IntoIterator<Item = &'a Forest>,
{
    forests
        .into_iter()
        .find(|forest| forest.find(target).is_some())
}
