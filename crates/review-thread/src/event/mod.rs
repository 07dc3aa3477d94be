//! Events exchanged between the thread view and its host.

mod thread_event;
mod thread_response;

pub use thread_event::ThreadEvent;
pub use thread_response::ThreadResponse;
