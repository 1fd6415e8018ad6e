// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export-format detection from the header row.

use super::headers::{contains_any, ACTIVITY_TYPE, LAP, RACE_NAME};
use super::ImportFormat;

/// Detect the export format. First match wins:
/// lap column → splits, activity-type column → activity list,
/// race-name column → legacy races.
///
/// A split file also carries an activity-type column, so the lap check
/// must come first.
pub fn sniff_format<S: AsRef<str>>(headers: &[S]) -> Option<ImportFormat> {
    if contains_any(headers, LAP) {
        Some(ImportFormat::GarminSplits)
    } else if contains_any(headers, ACTIVITY_TYPE) {
        Some(ImportFormat::GarminActivityList)
    } else if contains_any(headers, RACE_NAME) {
        Some(ImportFormat::LegacyRace)
    } else {
        None
    }
}
