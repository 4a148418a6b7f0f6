//! # snipsync-auth
//!
//! Password hashing/strength checking and JWT access tokens for SnipSync.
//!
//! Deliberately small: access tokens only, no refresh/rotation machinery.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
