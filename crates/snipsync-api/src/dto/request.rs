//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use snipsync_entity::snippet::Visibility;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password. Strength is enforced by the auth service.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Snippet creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    /// Snippet title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Optional description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Programming language label.
    #[validate(length(min = 1, max = 50))]
    pub language: String,
    /// The snippet body.
    #[validate(length(min = 1))]
    pub code: String,
    /// Visibility; defaults to public.
    pub visibility: Option<Visibility>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Snippet update request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSnippetRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// New language label.
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
    /// New snippet body.
    #[validate(length(min = 1))]
    pub code: Option<String>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New tag set.
    pub tags: Option<Vec<String>>,
}

/// Comment creation/update request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}
