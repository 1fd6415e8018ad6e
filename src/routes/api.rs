// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users: activity log, export and backup.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityDocument, ActivityInput, ActivityType};
use crate::services::{activities_to_csv, export_filename, Backup};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/api/export/activities.csv", get(export_csv))
        .route("/api/backup", get(backup))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by activity type
    #[serde(rename = "type")]
    activity_type: Option<ActivityType>,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    100
}

const MAX_LIMIT: u32 = 500;

/// List the user's activities, newest first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<Vec<ActivityDocument>>> {
    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_LIMIT);

    tracing::debug!(
        uid = %user.uid,
        activity_type = ?params.activity_type,
        limit,
        "Fetching activities"
    );

    let activities = state
        .db
        .list_activities(&user.uid, params.activity_type, limit)
        .await?;

    Ok(Json(activities))
}

/// Create an activity from a manual entry.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ActivityInput>,
) -> Result<(StatusCode, Json<ActivityDocument>)> {
    input.validate()?;

    let doc = ActivityDocument {
        id: crate::db::FirestoreDb::new_document_id(),
        owner_uid: user.uid,
        activity: input.into_activity(chrono::Utc::now()),
    };
    state.db.set_activity(&doc).await?;

    tracing::info!(id = %doc.id, "Activity created");
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActivityDocument>> {
    let doc = find_activity(&state, &user, &id).await?;
    Ok(Json(doc))
}

/// Replace the editable fields of an activity.
async fn update_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(input): Json<ActivityInput>,
) -> Result<Json<ActivityDocument>> {
    input.validate()?;

    let mut doc = find_activity(&state, &user, &id).await?;
    input.apply_to(&mut doc.activity);
    doc.activity.updated_at = Some(chrono::Utc::now());
    state.db.set_activity(&doc).await?;

    tracing::info!(id = %doc.id, "Activity updated");
    Ok(Json(doc))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let doc = find_activity(&state, &user, &id).await?;
    state.db.delete_activity(&doc.id).await?;

    tracing::info!(id = %doc.id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_activity(state: &AppState, user: &AuthUser, id: &str) -> Result<ActivityDocument> {
    state
        .db
        .get_activity(&user.uid, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
}

// ─── Export / Backup ─────────────────────────────────────────

/// Download every activity as CSV.
async fn export_csv(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let activities = state.db.all_activities(&user.uid).await?;
    let body = activities_to_csv(&activities)?;
    let filename = export_filename(chrono::Utc::now().date_naive());

    tracing::info!(uid = %user.uid, count = activities.len(), "Exported activities");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

/// Full JSON backup of the user's data.
async fn backup(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Backup>> {
    let activities = state.db.all_activities(&user.uid).await?;
    let nutrition = state.db.list_nutrition(&user.uid).await?;

    Ok(Json(Backup {
        exported_at: chrono::Utc::now(),
        activities,
        nutrition,
    }))
}
