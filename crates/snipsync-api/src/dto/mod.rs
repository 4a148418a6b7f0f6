//! Request and response DTOs.

pub mod request;
pub mod response;

use validator::Validate;

use snipsync_core::error::AppError;

/// Runs `validator` rules on a request DTO, mapping violations to a
/// validation error.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
