use super::{AdminSession, AppState, WebResult};
use crate::activity::{ActivityRow, ActivityViewer};
use crate::auth::AuthUser;
use crate::core::{ContentMap, ContentDocument, Section};
use crate::dashboard::Notification;
use crate::editor::{Preview, SectionEditor};
use crate::schema::{SectionSchema, schema_for};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: AuthUser,
}

pub async fn healthcheck() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> WebResult<Json<SignInResponse>> {
    let session = state.auth.sign_in(&payload.email, &payload.password).await?;
    state
        .open_dashboard(session.token.clone(), session.user.clone())
        .await;

    Ok(Json(SignInResponse {
        token: session.token,
        user: session.user,
    }))
}

pub async fn sign_out(State(state): State<AppState>, session: AdminSession) -> WebResult<StatusCode> {
    state.auth.sign_out(&session.token).await?;
    state.sessions.remove(&session.token).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Content as the public page sees it, straight from the store.
pub async fn public_content(State(state): State<AppState>) -> WebResult<Json<ContentMap>> {
    let records = state.store.list_all().await?;
    Ok(Json(
        records
            .into_iter()
            .map(|record| (record.section, record.content))
            .collect(),
    ))
}

pub async fn admin_content(session: AdminSession) -> Json<ContentMap> {
    let dashboard = session.dashboard.lock().await;
    Json(dashboard.content_map().clone())
}

pub async fn section_draft(
    session: AdminSession,
    Path(section): Path<String>,
) -> WebResult<Json<ContentDocument>> {
    let section: Section = section.parse()?;
    let dashboard = session.dashboard.lock().await;
    Ok(Json(dashboard.editor(section).draft_document()))
}

pub async fn section_schema(
    _session: AdminSession,
    Path(section): Path<String>,
) -> WebResult<Json<&'static SectionSchema>> {
    let section: Section = section.parse()?;
    Ok(Json(schema_for(section)))
}

pub async fn preview_section(
    _session: AdminSession,
    Path(section): Path<String>,
    Json(draft): Json<JsonValue>,
) -> WebResult<Json<Preview>> {
    let section: Section = section.parse()?;
    let editor = SectionEditor::from_draft(section, &draft)?;
    Ok(Json(editor.preview()))
}

pub async fn save_section(
    session: AdminSession,
    Path(section): Path<String>,
    Json(draft): Json<JsonValue>,
) -> WebResult<Json<ContentDocument>> {
    let section: Section = section.parse()?;
    let mut editor = SectionEditor::from_draft(section, &draft)?;

    let mut dashboard = session.dashboard.lock().await;
    let committed = dashboard.submit(&mut editor).await?;
    info!(%section, user = %session.user.email, "section published");
    Ok(Json(committed))
}

pub async fn notifications(session: AdminSession) -> Json<Vec<Notification>> {
    let mut dashboard = session.dashboard.lock().await;
    Json(dashboard.notifier_mut().active(Utc::now()).to_vec())
}

pub async fn activity(State(state): State<AppState>, _session: AdminSession) -> Json<Vec<ActivityRow>> {
    let mut viewer = ActivityViewer::new(state.audit.clone(), state.activity_limit);
    // Failures are logged by the viewer; an empty list is shown instead.
    let _ = viewer.load().await;
    Json(viewer.rows(Utc::now()))
}
