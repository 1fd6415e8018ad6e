// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity export: spreadsheet-friendly CSV and full JSON backup.

use crate::models::{ActivityDocument, NutritionDocument};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// Column order of the CSV export.
pub const EXPORT_COLUMNS: &[&str] = &[
    "id",
    "type",
    "date",
    "distanceKm",
    "distanceInputValue",
    "distanceInputUnit",
    "durationSec",
    "rpe",
    "workoutCategories",
    "workoutTitle",
    "note",
    "locationName",
    "locationMapUrl",
    "raceName",
    "raceNameZh",
    "distanceCategory",
    "officialTimeStr",
    "officialTimeSec",
    "chipTimeStr",
    "chipTimeSec",
    "rankCategory",
    "rankOverall",
    "organizer",
    "startTime",
    "categoryName",
    "bibNumber",
    "participantName",
    "feeRaw",
    "temperatureC",
    "createdAt",
    "updatedAt",
];

const UTF8_BOM: &str = "\u{feff}";

/// Render activities as CSV with a UTF-8 BOM so spreadsheets pick the right
/// encoding. An empty list renders as an empty body.
pub fn activities_to_csv(docs: &[ActivityDocument]) -> anyhow::Result<String> {
    if docs.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;

    for doc in docs {
        let value = serde_json::to_value(doc)?;
        let record: Vec<String> = EXPORT_COLUMNS
            .iter()
            .map(|column| cell(value.get(*column)))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner()?;
    Ok(format!("{UTF8_BOM}{}", String::from_utf8(bytes)?))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| cell(Some(item)))
            .collect::<Vec<_>>()
            .join(";"),
        Some(other) => other.to_string(),
    }
}

/// Download filename for an export made on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("running_log_{}.csv", crate::time_utils::format_iso_date(date))
}

/// Everything a user owns, as one JSON document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub exported_at: DateTime<Utc>,
    pub activities: Vec<ActivityDocument>,
    pub nutrition: Vec<NutritionDocument>,
}
