// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Activities (manual entries and CSV imports)
//! - Nutrition items
//!
//! Every document carries the `ownerUid` of the user it belongs to; reads
//! for another owner behave as if the document did not exist.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ActivityDocument, ActivityType, NutritionDocument};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// New random document ID.
    pub fn new_document_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Get an activity by document ID, if it belongs to `owner_uid`.
    pub async fn get_activity(
        &self,
        owner_uid: &str,
        id: &str,
    ) -> Result<Option<ActivityDocument>, AppError> {
        let doc: Option<ActivityDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(doc.filter(|d| d.owner_uid == owner_uid))
    }

    /// List a user's activities, newest date first.
    pub async fn list_activities(
        &self,
        owner_uid: &str,
        activity_type: Option<ActivityType>,
        limit: u32,
    ) -> Result<Vec<ActivityDocument>, AppError> {
        let owner = owner_uid.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                q.for_all([
                    q.field("ownerUid").eq(owner.clone()),
                    activity_type.and_then(|t| q.field("type").eq(t.as_str())),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Stream every activity of a user (export/backup), newest date first.
    pub async fn all_activities(&self, owner_uid: &str) -> Result<Vec<ActivityDocument>, AppError> {
        let owner = owner_uid.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("ownerUid").eq(owner.clone()))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj::<ActivityDocument>()
            .stream_query_with_errors()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace an activity document.
    pub async fn set_activity(&self, doc: &ActivityDocument) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&doc.id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an activity by document ID.
    pub async fn delete_activity(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::ACTIVITIES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store a batch of activities atomically.
    ///
    /// Each chunk of `BATCH_SIZE` documents is one transaction; chunks are
    /// committed in order, so a failure leaves earlier chunks in place.
    pub async fn insert_activities_atomic(&self, docs: &[ActivityDocument]) -> Result<(), AppError> {
        self.batch_write(docs, collections::ACTIVITIES, |doc| doc.id.clone())
            .await?;

        tracing::info!(count = docs.len(), "Activities written atomically");
        Ok(())
    }

    // ─── Nutrition Operations ────────────────────────────────────

    /// Get a nutrition item, if it belongs to `owner_uid`.
    pub async fn get_nutrition(
        &self,
        owner_uid: &str,
        id: &str,
    ) -> Result<Option<NutritionDocument>, AppError> {
        let doc: Option<NutritionDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::NUTRITION)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(doc.filter(|d| d.owner_uid == owner_uid))
    }

    /// List a user's nutrition items by name.
    pub async fn list_nutrition(&self, owner_uid: &str) -> Result<Vec<NutritionDocument>, AppError> {
        let owner = owner_uid.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::NUTRITION)
            .filter(move |q| q.field("ownerUid").eq(owner.clone()))
            .order_by([("name", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a nutrition item.
    pub async fn set_nutrition(&self, doc: &NutritionDocument) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::NUTRITION)
            .document_id(&doc.id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a nutrition item by document ID.
    pub async fn delete_nutrition(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::NUTRITION)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store a batch of nutrition items atomically.
    pub async fn insert_nutrition_atomic(&self, docs: &[NutritionDocument]) -> Result<(), AppError> {
        self.batch_write(docs, collections::NUTRITION, |doc| doc.id.clone())
            .await?;

        tracing::info!(count = docs.len(), "Nutrition items written atomically");
        Ok(())
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch write documents using transactions.
    async fn batch_write<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        T: Serialize + for<'de> Deserialize<'de> + Sync + Send,
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .update()
                    .in_col(collection)
                    .document_id(&doc_id)
                    .object(item)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add write to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch write: {}", e))
            })?;

            tracing::debug!(collection, count = chunk.len(), "Committed write batch");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_mock_reports_database_error() {
        let db = FirestoreDb::new_mock();

        let err = db.list_activities("user-1", None, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_batch_insert_offline_reports_database_error() {
        let db = FirestoreDb::new_mock();
        let now = chrono::Utc::now();
        let doc = ActivityDocument {
            id: FirestoreDb::new_document_id(),
            owner_uid: "user-1".to_string(),
            activity: crate::models::Activity::new(
                ActivityType::Training,
                now.date_naive(),
                5.0,
                1500,
                now,
            ),
        };

        let err = db.insert_activities_atomic(&[doc]).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let err = db.insert_nutrition_atomic(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = FirestoreDb::new_document_id();
        let b = FirestoreDb::new_document_id();

        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
