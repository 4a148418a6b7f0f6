//! Upvote toggling.

pub mod service;

pub use service::{ToggleResult, UpvoteService};
