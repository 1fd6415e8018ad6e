// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Runlog: backend for a personal running log.
//!
//! Imports legacy race spreadsheets and Garmin Connect CSV exports into a
//! single activity model, stores activities and race-nutrition items in
//! Firestore, and exports them back out as CSV or JSON.

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::ActivityImporter;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub importer: ActivityImporter,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let importer = ActivityImporter::new(db.clone(), config.category_policy);
        Self {
            config,
            db,
            importer,
        }
    }
}
