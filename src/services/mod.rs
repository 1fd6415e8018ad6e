// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod export;
pub mod import;
pub mod nutrition;

pub use export::{activities_to_csv, export_filename, Backup};
pub use import::{ActivityImporter, ImportResult};
pub use nutrition::{parse_ai_json, NutritionImportError, ParsedNutrition};
