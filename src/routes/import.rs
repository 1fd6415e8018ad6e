// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV upload routes.
//!
//! The request body is the raw CSV text. Preview normalizes without
//! storing; import stores every converted record in one atomic write.

use crate::error::Result;
use crate::import::ImportFormat;
use crate::middleware::auth::AuthUser;
use crate::models::Activity;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/import/preview", post(preview_import))
        .route("/api/import", post(commit_import))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportPreviewResponse {
    pub format: ImportFormat,
    pub activities: Vec<Activity>,
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportResponse {
    pub format: ImportFormat,
    pub imported: usize,
    pub skipped: usize,
    pub ids: Vec<String>,
}

async fn preview_import(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: String,
) -> Result<Json<ImportPreviewResponse>> {
    tracing::debug!(uid = %user.uid, bytes = body.len(), "Previewing import");

    let outcome = state.importer.preview(&body)?;

    Ok(Json(ImportPreviewResponse {
        format: outcome.format,
        imported: outcome.activities.len(),
        skipped: outcome.skipped,
        activities: outcome.activities,
    }))
}

async fn commit_import(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let result = state.importer.import(&user.uid, &body).await?;

    tracing::info!(
        uid = %user.uid,
        format = result.format.as_str(),
        imported = result.imported,
        skipped = result.skipped,
        "Import committed"
    );

    Ok(Json(ImportResponse {
        format: result.format,
        imported: result.imported,
        skipped: result.skipped,
        ids: result.ids,
    }))
}
