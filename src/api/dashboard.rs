//! The single control panel: list, search, filter, paginate, add and edit.

use axum::{
    Extension, Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, FlashKind};
use super::validation::{parse_page, parse_per_page, parse_student_id};
use super::{ApiError, AppState};
use crate::constants::{messages, routes};
use crate::models::student::{RosterQuery, StudentInput, UpsertOutcome};
use crate::models::user::SessionUser;
use crate::views::{self, dashboard::DashboardView};

/// Raw query parameters. Kept as strings so bad paging input degrades to
/// defaults instead of a 400.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub gender: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub matric_no: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub phone: String,
}

/// GET /dashboard
pub async fn show(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    session: Session,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let dashboard = &state.config().dashboard;

    let query = RosterQuery::new(
        params.q.as_deref(),
        params.gender.as_deref(),
        parse_page(params.page.as_deref()),
        parse_per_page(
            params.per_page.as_deref(),
            dashboard.default_per_page,
            dashboard.max_per_page,
        ),
    );

    let roster = state.student_service().list(&query).await?;
    let flashes = flash::take(&session).await;

    let avatar = user
        .avatar
        .as_deref()
        .unwrap_or(&dashboard.default_avatar);

    Ok(Html(views::dashboard::render(&DashboardView {
        username: &user.username,
        avatar,
        query: &query,
        roster: &roster,
        flashes: &flashes,
    })))
}

/// POST /dashboard
/// Insert when `id` is blank, otherwise update. Always redirects back.
pub async fn save(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<StudentForm>,
) -> Result<Redirect, ApiError> {
    let result = match parse_student_id(form.id.as_deref()) {
        Ok(id) => state
            .student_service()
            .upsert(StudentInput {
                id,
                name: form.name,
                matric_no: form.matric_no,
                gender: form.gender,
                department: form.department,
                faculty: form.faculty,
                level: form.level,
                dob: form.dob,
                phone: form.phone,
            })
            .await
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };

    let (kind, message) = match result {
        Ok(UpsertOutcome::Created { .. }) => {
            (FlashKind::Success, messages::STUDENT_ADDED.to_string())
        }
        Ok(UpsertOutcome::Updated { .. }) => {
            (FlashKind::Success, messages::STUDENT_UPDATED.to_string())
        }
        Err(e) => (FlashKind::Error, e.into_flash()?),
    };

    flash::redirect(&session, kind, message, routes::DASHBOARD).await
}
