//! Create operator account command handler

use crate::config::Config;
use crate::services::AuthError;
use crate::state::SharedState;

pub async fn cmd_create_user(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    match state.auth_service.register(username, password).await {
        Ok(id) => println!("✓ Created account '{}' (ID: {id})", username.trim()),
        Err(AuthError::Conflict) => println!("Username '{}' already exists.", username.trim()),
        Err(AuthError::Validation(msg)) => println!("{msg}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
