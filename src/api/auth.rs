use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, FlashKind};
use super::{ApiError, AppState};
use crate::constants::{messages, routes, session::USER_KEY};
use crate::models::user::SessionUser;
use crate::views;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through only with a logged-in session, handing the
/// identity to handlers as an `Extension<SessionUser>`.
pub async fn require_session(session: Session, mut request: Request, next: Next) -> Response {
    match session.get::<SessionUser>(USER_KEY).await {
        Ok(Some(user)) => {
            tracing::Span::current().record("user_id", user.id);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => Redirect::to(routes::LOGIN).into_response(),
        Err(e) => ApiError::session(e).into_response(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn index(session: Session) -> Result<Redirect, ApiError> {
    let user = session
        .get::<SessionUser>(USER_KEY)
        .await
        .map_err(ApiError::session)?;

    Ok(Redirect::to(if user.is_some() {
        routes::DASHBOARD
    } else {
        routes::LOGIN
    }))
}

/// GET /register
pub async fn register_page(session: Session) -> Html<String> {
    let flashes = flash::take(&session).await;
    Html(views::auth::register_page(&flashes))
}

/// POST /register
/// Creates the account; the operator still has to log in afterwards.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, ApiError> {
    match state
        .auth_service()
        .register(&form.username, &form.password)
        .await
    {
        Ok(_) => {
            flash::redirect(&session, FlashKind::Success, messages::REGISTERED, routes::LOGIN).await
        }
        Err(e) => {
            let message = ApiError::from(e).into_flash()?;
            flash::redirect(&session, FlashKind::Error, message, routes::REGISTER).await
        }
    }
}

/// GET /login
pub async fn login_page(session: Session) -> Html<String> {
    let flashes = flash::take(&session).await;
    Html(views::auth::login_page(&flashes))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, ApiError> {
    match state
        .auth_service()
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            // New id on privilege change.
            session.cycle_id().await.map_err(ApiError::session)?;
            session
                .insert(USER_KEY, &user)
                .await
                .map_err(ApiError::session)?;

            tracing::info!(user_id = user.id, "Login: {}", user.username);
            flash::redirect(&session, FlashKind::Success, messages::LOGGED_IN, routes::DASHBOARD)
                .await
        }
        Err(e) => {
            let message = ApiError::from(e).into_flash()?;
            flash::redirect(&session, FlashKind::Error, message, routes::LOGIN).await
        }
    }
}

/// GET /logout
/// Always succeeds, logged in or not.
pub async fn logout(session: Session) -> Result<Redirect, ApiError> {
    session.clear().await;
    flash::redirect(&session, FlashKind::Info, messages::LOGGED_OUT, routes::LOGIN).await
}
