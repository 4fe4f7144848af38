//! Domain service for operator accounts.
//!
//! Handles registration and credential checks. Session state itself lives
//! in the HTTP layer; this service only says who the caller is.

use thiserror::Error;

use crate::models::user::SessionUser;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password and unknown username share this variant.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    Conflict,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the default role. Does not log it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if either field is empty and
    /// [`AuthError::Conflict`] if the username is taken.
    async fn register(&self, username: &str, password: &str) -> Result<i32, AuthError>;

    /// Verifies credentials and returns the identity to store in the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AuthError>;
}
