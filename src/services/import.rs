// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity import service.
//!
//! Handles the upload workflow:
//! 1. Parse the CSV text and detect its format
//! 2. Normalize rows into activity records
//! 3. Store the records in Firestore (commit only)

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::import::{self, CategoryPolicy, ImportContext, ImportFormat, ImportOutcome};
use crate::models::{Activity, ActivityDocument};

/// Normalizes uploads and persists them for a user.
#[derive(Clone)]
pub struct ActivityImporter {
    db: FirestoreDb,
    policy: CategoryPolicy,
}

impl ActivityImporter {
    pub fn new(db: FirestoreDb, policy: CategoryPolicy) -> Self {
        Self { db, policy }
    }

    /// Normalize `text` without writing anything.
    pub fn preview(&self, text: &str) -> Result<ImportOutcome> {
        let ctx = ImportContext::new(self.policy);
        Ok(import::normalize_csv(text, &ctx)?)
    }

    /// Normalize `text` and store every record for `owner_uid`.
    pub async fn import(&self, owner_uid: &str, text: &str) -> Result<ImportResult> {
        let outcome = self.preview(text)?;

        tracing::info!(
            owner_uid,
            format = outcome.format.as_str(),
            rows = outcome.activities.len(),
            "Importing activities"
        );

        let docs = to_documents(owner_uid, outcome.activities);
        self.db.insert_activities_atomic(&docs).await?;

        Ok(ImportResult {
            format: outcome.format,
            imported: docs.len(),
            skipped: outcome.skipped,
            ids: docs.into_iter().map(|d| d.id).collect(),
        })
    }
}

/// Result of a committed import.
#[derive(Debug)]
pub struct ImportResult {
    pub format: ImportFormat,
    pub imported: usize,
    pub skipped: usize,
    /// IDs of the new documents, in source order
    pub ids: Vec<String>,
}

/// Assign document IDs and ownership to converted records.
fn to_documents(owner_uid: &str, activities: Vec<Activity>) -> Vec<ActivityDocument> {
    activities
        .into_iter()
        .map(|activity| ActivityDocument {
            id: FirestoreDb::new_document_id(),
            owner_uid: owner_uid.to_string(),
            activity,
        })
        .collect()
}
