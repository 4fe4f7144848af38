//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::{Store, is_unique_violation};
use crate::db::repositories::user::hash_password;
use crate::models::user::SessionUser;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;
use tokio::task;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<i32, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password required".to_string(),
            ));
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))?
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        match self.store.create_user(username, password_hash).await {
            Ok(id) => {
                tracing::info!(user_id = id, "Registered account: {username}");
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => Err(AuthError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let user = self
            .store
            .verify_user_password(username.trim(), password, &self.security)
            .await?;

        let outcome = if user.is_some() { "success" } else { "failure" };
        metrics::counter!("logins_total", "outcome" => outcome).increment(1);

        user.ok_or(AuthError::InvalidCredentials)
    }
}
