// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV import normalizer.
//!
//! Converts three export schemas into canonical [`Activity`] records:
//! - Legacy race spreadsheet (localized headers, one race per row)
//! - Garmin Connect activity list (one activity per row)
//! - Garmin split/lap export (one row per lap, folded into one activity)
//!
//! The normalizer is pure: no I/O, no shared state. Persisting the output is
//! the caller's job.

pub mod category;
pub mod garmin_list;
pub mod headers;
pub mod legacy;
pub mod parse;
pub mod sniff;
pub mod splits;
pub mod table;

pub use category::CategoryPolicy;
pub use sniff::sniff_format;
pub use table::{CsvTable, RawRow};

use crate::models::Activity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Detected export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    LegacyRace,
    GarminActivityList,
    GarminSplits,
}

impl ImportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportFormat::LegacyRace => "legacy_race",
            ImportFormat::GarminActivityList => "garmin_activity_list",
            ImportFormat::GarminSplits => "garmin_splits",
        }
    }
}

/// Per-import inputs that are not part of the file.
#[derive(Debug, Clone, Copy)]
pub struct ImportContext {
    /// Fallback date for rows without one
    pub today: NaiveDate,
    /// `created_at` of every produced record
    pub now: DateTime<Utc>,
    pub category_policy: CategoryPolicy,
}

impl ImportContext {
    /// Context stamped with the current UTC time.
    pub fn new(category_policy: CategoryPolicy) -> Self {
        let now = Utc::now();
        Self {
            today: now.date_naive(),
            now,
            category_policy,
        }
    }
}

/// Converted records plus bookkeeping for the caller.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub format: ImportFormat,
    /// Records in source order
    pub activities: Vec<Activity>,
    /// Rows that were not data rows
    pub skipped: usize,
}

/// Import errors. Everything else degrades to zero values.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Unrecognized import format (columns: {})", .headers.join(", "))]
    UnrecognizedFormat { headers: Vec<String> },

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),
}

/// Route a parsed table to its converter.
pub fn normalize(table: &CsvTable, ctx: &ImportContext) -> Result<ImportOutcome, ImportError> {
    let format = sniff_format(&table.headers).ok_or_else(|| ImportError::UnrecognizedFormat {
        headers: table.headers.clone(),
    })?;

    let (activities, skipped) = match format {
        ImportFormat::LegacyRace => convert_each(&table.rows, ctx, legacy::convert_row),
        ImportFormat::GarminActivityList => {
            convert_each(&table.rows, ctx, garmin_list::convert_row)
        }
        ImportFormat::GarminSplits => {
            let aggregate = splits::aggregate_laps(&table.rows, ctx);
            (vec![aggregate.activity], aggregate.skipped)
        }
    };

    tracing::info!(
        format = format.as_str(),
        converted = activities.len(),
        skipped,
        "Normalized import"
    );

    Ok(ImportOutcome {
        format,
        activities,
        skipped,
    })
}

/// Parse CSV text and normalize it.
pub fn normalize_csv(text: &str, ctx: &ImportContext) -> Result<ImportOutcome, ImportError> {
    let table = CsvTable::parse(text)?;
    normalize(&table, ctx)
}

fn convert_each<F>(rows: &[RawRow], ctx: &ImportContext, convert: F) -> (Vec<Activity>, usize)
where
    F: Fn(&RawRow, &ImportContext) -> Option<Activity>,
{
    let activities: Vec<Activity> = rows.iter().filter_map(|row| convert(row, ctx)).collect();
    let skipped = rows.len() - activities.len();
    (activities, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;

    #[test]
    fn test_unrecognized_format_lists_headers() {
        let err = normalize_csv("name,brand\nGel,X\n", &ImportContext::new(CategoryPolicy::Numeric))
            .unwrap_err();

        match err {
            ImportError::UnrecognizedFormat { headers } => {
                assert_eq!(headers, vec!["name", "brand"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_legacy_skips_rows_without_race_name() {
        let csv = "比賽日期,比賽名稱,距離\n2024-01-01,元旦路跑,10K\n2024-02-01,,5K\n";
        let outcome = normalize_csv(csv, &ImportContext::new(CategoryPolicy::Numeric)).unwrap();

        assert_eq!(outcome.format, ImportFormat::LegacyRace);
        assert_eq!(outcome.activities.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.activities[0].activity_type, ActivityType::Race);
    }

    #[test]
    fn test_split_file_with_activity_type_column_aggregates() {
        let csv = "Laps,Activity Type,Time,Distance,Avg Pace\n\
                   1,Running,5:00,1.0,5:00\n\
                   2,Running,5:10,1.0,5:10\n";
        let outcome = normalize_csv(csv, &ImportContext::new(CategoryPolicy::Numeric)).unwrap();

        assert_eq!(outcome.format, ImportFormat::GarminSplits);
        assert_eq!(outcome.activities.len(), 1);
        assert_eq!(outcome.activities[0].duration_sec, 610);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ImportFormat::LegacyRace.as_str(), "legacy_race");
        assert_eq!(
            serde_json::to_value(ImportFormat::GarminSplits).unwrap(),
            "garmin_splits"
        );
    }
}
