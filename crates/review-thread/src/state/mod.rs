//! State management for the thread view.

mod cursor;
mod thread_state;

pub use cursor::{Focus, ThreadCursor};
pub use thread_state::{ThreadSettings, ThreadViewState};
