//! Convenience result type alias for SnipSync.

use crate::error::AppError;

/// A specialized `Result` type for SnipSync operations.
///
/// Defined as a convenience so that every crate does not need to write
/// `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
