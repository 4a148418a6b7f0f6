//! Account signup, login, and profile lookup.

pub mod service;

pub use service::{AuthService, AuthenticatedUser, LoginData, SignupData};
