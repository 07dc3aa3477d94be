//! # review-thread
//!
//! The threading engine behind a review's comment section: a review and its
//! replies form a tree, the user can open any node, deep links reconstruct
//! the path from an arbitrary comment back to the review, and local edits
//! stay consistent until the next full refetch.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: it receives already parsed forests and
//! emits events, it never performs I/O. Every derived structure (index,
//! path, cursor) is rebuilt from the latest forest snapshot.
//!
//! - [`CommentIndex`] maps ids to nodes in one pass and rejects duplicate ids.
//! - [`trace`] walks parent links from any node back to the review root and
//!   refuses to loop on malformed input.
//! - [`ThreadCursor`] holds the focus and derives breadcrumb and visible replies.
//! - [`mutate`] applies pure, ancestor-copy-on-write updates; untouched
//!   subtrees keep their `Arc` identity.
//! - [`deep_link`] reproduces the navigation state of a manual click path.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use review_thread::{ThreadAction, ThreadEvent, ThreadViewState, NodeId};
//!
//! let mut state = ThreadViewState::new(forest, Some(viewer))?;
//! for event in state.handle_action(ThreadAction::DeepLink(NodeId::comment(42))) {
//!     match event {
//!         ThreadEvent::ScrollRequested(target) => { /* scroll once rendered */ }
//!         ThreadEvent::SubmitUpvote { node_id } => { /* call the API */ }
//!         _ => {}
//!     }
//! }
//! ```

pub mod action;
pub mod deep_link;
pub mod error;
pub mod event;
pub mod index;
pub mod model;
pub mod mutate;
pub mod path;
pub mod state;

// Re-export commonly used types
pub use action::ThreadAction;
pub use deep_link::{Resolution, ScrollTarget};
pub use error::{Result, ThreadError};
pub use event::{ThreadEvent, ThreadResponse};
pub use index::{CommentIndex, IndexEntry};
pub use model::{Author, Forest, Node, NodeId, UserId, REVIEW_ID_PREFIX};
pub use mutate::Mutation;
pub use path::{trace, trace_ids};
pub use state::{Focus, ThreadCursor, ThreadSettings, ThreadViewState};
