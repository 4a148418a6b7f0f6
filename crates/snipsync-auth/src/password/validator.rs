//! Password policy enforcement for new passwords.

use zxcvbn::Score;

use snipsync_core::config::auth::AuthConfig;
use snipsync_core::error::AppError;

/// Minimum accepted password length.
const MIN_LENGTH: usize = 8;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum zxcvbn score accepted at signup.
    min_score: Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_score: score_from(config.min_password_score),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.len() < MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_LENGTH} characters long"
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }
}

fn score_from(value: u8) -> Score {
    match value {
        0 => Score::Zero,
        1 => Score::One,
        2 => Score::Two,
        3 => Score::Three,
        _ => Score::Four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_ttl_hours: 24,
            min_password_score: 3,
        })
    }

    #[test]
    fn test_rejects_short_passwords() {
        assert!(validator().validate("abc", &[]).is_err());
    }

    #[test]
    fn test_rejects_weak_passwords() {
        assert!(validator().validate("password123", &[]).is_err());
    }

    #[test]
    fn test_accepts_strong_passwords() {
        assert!(validator().validate("vT9#mQx4!kRw7zP2", &[]).is_ok());
    }

    #[test]
    fn test_username_counts_against_strength() {
        assert!(validator()
            .validate("jsmith2024jsmith2024", &["jsmith2024"])
            .is_err());
    }
}
