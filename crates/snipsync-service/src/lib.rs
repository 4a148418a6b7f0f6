//! # snipsync-service
//!
//! Business logic services for SnipSync. Each service orchestrates
//! repositories and enforces the rules the HTTP layer must not know about.
//!
//! The [`share`] module is the interesting one: minting and resolving the
//! short-lived codes that bridge the web platform and the editor extension.

pub mod auth;
pub mod comment;
pub mod context;
pub mod share;
pub mod snippet;
pub mod upvote;

pub use context::RequestContext;
