use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::{prelude::*, users};
use crate::models::user::{DEFAULT_ROLE, SessionUser};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a new account with an already-hashed password and returns its id.
    pub async fn create(&self, username: &str, password_hash: String) -> Result<i32> {
        let active_model = users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            role: Set(DEFAULT_ROLE.to_string()),
            avatar: Set(None),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Users::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(res.last_insert_id)
    }

    pub async fn count(&self) -> Result<u64> {
        Users::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Verify password for a user, returning the account on success.
    /// The Argon2 work runs on the blocking pool, and an unknown username
    /// costs one hash with the configured parameters, same as a real check.
    pub async fn verify_password(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<SessionUser>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = password.to_string();
        let security = security.clone();

        let is_valid = task::spawn_blocking(move || match stored_hash {
            Some(stored_hash) => {
                let parsed_hash = PasswordHash::new(&stored_hash)
                    .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

                Ok::<bool, anyhow::Error>(
                    Argon2::default()
                        .verify_password(password.as_bytes(), &parsed_hash)
                        .is_ok(),
                )
            }
            None => hash_password(&password, &security).map(|_| false),
        })
        .await
        .context("Password verification task panicked")??;

        Ok(user.filter(|_| is_valid).map(SessionUser::from))
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn test_hash_password_is_salted() {
        let first = hash_password("hunter2", &cheap_params()).unwrap();
        let second = hash_password("hunter2", &cheap_params()).unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_verifies_with_default_verifier() {
        let hash = hash_password("hunter2", &cheap_params()).unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(
            Argon2::default()
                .verify_password(b"hunter2", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    async fn repo() -> UserRepository {
        let store = crate::db::Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .unwrap();
        UserRepository::new(store.conn)
    }

    #[tokio::test]
    async fn test_verify_password_known_and_unknown_users() {
        let repo = repo().await;
        let hash = hash_password("hunter2", &cheap_params()).unwrap();
        let id = repo.create("admin", hash).await.unwrap();

        let user = repo
            .verify_password("admin", "hunter2", &cheap_params())
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.id), Some(id));

        assert!(
            repo.verify_password("admin", "wrong", &cheap_params())
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.verify_password("ghost", "hunter2", &cheap_params())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unknown_user_still_runs_argon2() {
        let repo = repo().await;
        let unusable = SecurityConfig {
            argon2_memory_cost_kib: 1,
            argon2_time_cost: 0,
            argon2_parallelism: 1,
        };

        // Only the hashing step can fail here, so an error shows it ran.
        assert!(
            repo.verify_password("ghost", "hunter2", &unusable)
                .await
                .is_err()
        );
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 1,
            argon2_time_cost: 0,
            argon2_parallelism: 1,
        };
        assert!(hash_password("hunter2", &config).is_err());
    }
}
