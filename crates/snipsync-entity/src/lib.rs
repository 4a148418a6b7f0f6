//! # snipsync-entity
//!
//! Domain entity models for SnipSync. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod comment;
pub mod share_code;
pub mod snippet;
pub mod upvote;
pub mod user;
