//! Review API client layer
//!
//! This crate sits between the [`review_thread`] engine and whatever serves
//! review data. The engine emits events; this crate turns them into calls
//! on a [`ReviewApi`] and converts the answers back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  ThreadEvent   ┌──────────────┐
//! │ ThreadViewState  │───────────────►│  ThreadSync  │
//! │ (review-thread)  │◄───────────────│              │
//! └──────────────────┘ ThreadResponse └──────┬───────┘
//!                                            │
//!                                  ┌─────────┴─────────┐
//!                                  │  ReviewApi trait  │
//!                                  └─────────┬─────────┘
//!                                            ▼
//!                                  ┌───────────────────┐
//!                                  │  FixtureClient    │
//!                                  └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use review_client::{FixtureClient, ThreadSync, UserSummary};
//! use review_thread::{ThreadAction, ThreadResponse, ThreadViewState, UserId};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let viewer = UserSummary { id: 2, username: "bo".into(), profile_image_url: None };
//! let sync = ThreadSync::new(FixtureClient::new("fixtures", viewer), 1);
//!
//! if let ThreadResponse::Loaded(forest) = sync.load().await? {
//!     let mut state = ThreadViewState::new(forest, Some(UserId(2)))?;
//!     let events = state.handle_action(ThreadAction::Reply("Same here".into()));
//!     let rendered = sync.drive(&mut state, events).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fixture_client;
pub mod session;
pub mod sync;
pub mod types;

// Re-export main types
pub use client::ReviewApi;
pub use fixture_client::FixtureClient;
pub use session::{SessionNotice, SessionNotifier, Subscription};
pub use sync::ThreadSync;
pub use types::{CommentDto, NewComment, RatingDto, UpvoteResponse, UpvoteTarget, UserSummary};
