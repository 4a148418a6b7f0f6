//! # snipsync-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all SnipSync entities, plus the [`ShareCodeStore`]
//! persistence interface consumed by the share-code service.
//!
//! [`ShareCodeStore`]: repositories::share_code::ShareCodeStore

pub mod connection;
pub mod migration;
pub mod repositories;
