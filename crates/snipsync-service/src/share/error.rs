//! Typed errors for the share-code service boundary.

use thiserror::Error;

use snipsync_core::error::AppError;

/// Everything that can go wrong minting or resolving a share code.
///
/// `CodeExpired` is deliberately distinct from `CodeNotFound` so callers can
/// prompt for regeneration instead of showing a generic "invalid code".
/// Duplicate-insert races never appear here: the service retries them
/// internally until they degenerate into `GenerationExhausted`.
#[derive(Debug, Error)]
pub enum ShareCodeError {
    /// Issuance was requested for a snippet that does not exist.
    #[error("Snippet not found")]
    SnippetNotFound,
    /// The code was never issued, or was already cleaned up.
    #[error("Share code not found")]
    CodeNotFound,
    /// The code exists but is past its validity window.
    #[error("Share code has expired")]
    CodeExpired,
    /// Every generation attempt collided with an existing code.
    #[error("Could not mint a unique share code after {attempts} attempts")]
    GenerationExhausted {
        /// How many candidates were tried.
        attempts: u32,
    },
    /// An underlying store or collaborator failure.
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<ShareCodeError> for AppError {
    fn from(err: ShareCodeError) -> Self {
        match err {
            ShareCodeError::SnippetNotFound => AppError::not_found("Snippet not found"),
            ShareCodeError::CodeNotFound => AppError::not_found("Share code not found"),
            ShareCodeError::CodeExpired => {
                AppError::gone("Share code has expired. Please generate a new one.")
            }
            ShareCodeError::GenerationExhausted { attempts } => AppError::internal(format!(
                "Could not mint a unique share code after {attempts} attempts"
            )),
            ShareCodeError::Storage(e) => e,
        }
    }
}
