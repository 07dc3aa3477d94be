//! Data model for review threads.

mod forest;
mod node;

pub use forest::{Forest, Nodes};
pub use node::{Author, Node, NodeId, UserId, REVIEW_ID_PREFIX};
