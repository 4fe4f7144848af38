//! One-shot notices stored in the session and shown on the next page.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::ApiError;
use crate::constants::session::FLASH_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

pub async fn push(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
) -> Result<(), ApiError> {
    let mut pending: Vec<Flash> = session
        .get(FLASH_KEY)
        .await
        .map_err(ApiError::session)?
        .unwrap_or_default();

    pending.push(Flash {
        kind,
        message: message.into(),
    });

    session
        .insert(FLASH_KEY, pending)
        .await
        .map_err(ApiError::session)
}

/// Drains pending messages. A broken session just yields nothing.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {e}");
            Vec::new()
        }
    }
}

/// Queues a message and redirects, the usual ending of a form POST.
pub async fn redirect(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
    to: &str,
) -> Result<Redirect, ApiError> {
    push(session, kind, message).await?;
    Ok(Redirect::to(to))
}
