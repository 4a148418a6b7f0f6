//! # snipsync-core
//!
//! Core crate for SnipSync. Contains configuration schemas, the unified
//! error system, and the [`Clock`] abstraction used wherever wall-clock
//! time feeds business decisions.
//!
//! This crate has **no** internal dependencies on other SnipSync crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;

pub use clock::{Clock, SystemClock};
pub use error::AppError;
pub use result::AppResult;
