//! Core record types for Userbase.
//!
//! This crate defines the plugin-free building blocks shared by the query
//! engine, the storage layer and the HTTP surface:
//! - User identifiers (UUID v4)
//! - The `User` record keyed by email address
//! - Email and identifier validation

mod email;
mod ids;
mod user;

pub use email::{validate_email, MAX_EMAIL_LEN, MAX_LOCAL_PART_LEN};
pub use ids::UserId;
pub use user::User;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, TypeError>;

/// Errors produced while validating record input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("malformed user id: {0}")]
    MalformedId(String),
}
