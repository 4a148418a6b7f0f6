//! Account service — signup, login, profile.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use snipsync_auth::jwt::encoder::{IssuedToken, JwtEncoder};
use snipsync_auth::password::{PasswordHasher, PasswordValidator};
use snipsync_core::error::AppError;
use snipsync_database::repositories::user::UserRepository;
use snipsync_entity::user::{CreateUser, User};

/// Signup request data.
#[derive(Debug, Clone)]
pub struct SignupData {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Login request data.
#[derive(Debug, Clone)]
pub struct LoginData {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// A user together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The account.
    pub user: User,
    /// The access token.
    pub token: IssuedToken,
}

/// Manages accounts and access-token issuance.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Access token encoder.
    jwt_encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt_encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            jwt_encoder,
        }
    }

    /// Registers a new account and logs it in.
    pub async fn signup(&self, data: SignupData) -> Result<AuthenticatedUser, AppError> {
        self.validator
            .validate(&data.password, &[&data.username, &data.email])?;

        let password_hash = self.hasher.hash_password(&data.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: data.username,
                email: data.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self
            .jwt_encoder
            .generate_access_token(user.id, &user.username)?;

        Ok(AuthenticatedUser { user, token })
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, data: LoginData) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .user_repo
            .find_by_email(&data.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let valid = self
            .hasher
            .verify_password(&data.password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        info!(user_id = %user.id, "User logged in");

        let token = self
            .jwt_encoder
            .generate_access_token(user.id, &user.username)?;

        Ok(AuthenticatedUser { user, token })
    }

    /// Fetches a user's profile.
    pub async fn profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
