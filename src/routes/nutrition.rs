// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition item routes.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NutritionDocument, NutritionItem};
use crate::services::parse_ai_json;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/nutrition", get(list_items).post(create_item))
        .route("/api/nutrition/{id}", delete(delete_item))
        .route("/api/nutrition/import", post(import_items))
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<NutritionDocument>>> {
    Ok(Json(state.db.list_nutrition(&user.uid).await?))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(item): Json<NutritionItem>,
) -> Result<(StatusCode, Json<NutritionDocument>)> {
    item.validate()?;

    let doc = new_document(&user.uid, item, chrono::Utc::now());
    state.db.set_nutrition(&doc).await?;

    Ok((StatusCode::CREATED, Json(doc)))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let doc = state
        .db
        .get_nutrition(&user.uid, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Nutrition item {} not found", id)))?;

    state.db.delete_nutrition(&doc.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct NutritionImportResponse {
    pub imported: usize,
    pub skipped: usize,
}

/// Import a JSON array produced by a chat assistant.
async fn import_items(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: String,
) -> Result<Json<NutritionImportResponse>> {
    let parsed = parse_ai_json(&body)?;

    for item in &parsed.items {
        item.validate()?;
    }

    let now = chrono::Utc::now();
    let docs: Vec<NutritionDocument> = parsed
        .items
        .into_iter()
        .map(|item| new_document(&user.uid, item, now))
        .collect();

    state.db.insert_nutrition_atomic(&docs).await?;

    tracing::info!(
        uid = %user.uid,
        imported = docs.len(),
        skipped = parsed.skipped,
        "Nutrition items imported"
    );

    Ok(Json(NutritionImportResponse {
        imported: docs.len(),
        skipped: parsed.skipped,
    }))
}

fn new_document(
    owner_uid: &str,
    item: NutritionItem,
    now: chrono::DateTime<chrono::Utc>,
) -> NutritionDocument {
    NutritionDocument {
        id: FirestoreDb::new_document_id(),
        owner_uid: owner_uid.to_string(),
        item,
        created_at: now,
        updated_at: now,
    }
}
