use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, FlashKind};
use super::{AckResponse, ApiError, AppState};
use crate::constants::{messages, routes};

/// GET /students
/// Old bookmark target.
pub async fn legacy_redirect() -> Redirect {
    Redirect::to(routes::DASHBOARD)
}

async fn delete_student(state: &AppState, session: &Session, id: i32) -> Result<(), ApiError> {
    state.student_service().delete(id).await?;
    flash::push(session, FlashKind::Info, messages::STUDENT_DELETED).await
}

/// GET /delete_student/{id}
/// Link-driven delete from the dashboard table.
pub async fn delete_and_redirect(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    delete_student(&state, &session, id).await?;
    Ok(Redirect::to(routes::DASHBOARD))
}

/// POST /delete_student/{id}
/// Script-driven delete; answers `{"success": true}` even for unknown ids.
pub async fn delete_and_ack(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<AckResponse>, ApiError> {
    delete_student(&state, &session, id).await?;
    Ok(Json(AckResponse::ok()))
}
