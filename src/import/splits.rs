// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin single-activity split export → one aggregated activity.

use super::headers::{garmin, LAP};
use super::parse::{parse_grouped_number, parse_time_to_sec, round2};
use super::table::RawRow;
use super::ImportContext;
use crate::models::{Activity, ActivityType, WorkoutCategory};

/// Result of folding a lap file into one activity.
#[derive(Debug, Clone)]
pub struct LapAggregate {
    pub activity: Activity,
    /// Number of lap rows that contributed
    pub laps: usize,
    /// Rows without a lap number (blank or summary rows)
    pub skipped: usize,
}

/// Sum every lap row into a single training activity.
///
/// The export carries no reliable date, so the record is dated today and
/// the user corrects it after import. Lap lines in the note follow file order.
pub fn aggregate_laps(rows: &[RawRow], ctx: &ImportContext) -> LapAggregate {
    let mut total_km = 0.0;
    let mut total_sec: u64 = 0;
    let mut lines = Vec::new();
    let mut skipped = 0;

    for row in rows {
        let lap = match row.first(LAP) {
            Some(lap) if !is_summary_row(lap) => lap,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let distance = row.first(garmin::DISTANCE).unwrap_or("0");
        let time = row.first(garmin::TIME).unwrap_or_default();
        let pace = row.first(garmin::AVG_PACE).unwrap_or_default();

        total_km += parse_grouped_number(distance);
        total_sec = total_sec.saturating_add(parse_time_to_sec(time));
        lines.push(format!("Lap {}: {}km @ {} ({})", lap, distance, time, pace));
    }

    let distance_km = round2(total_km);
    let mut activity = Activity::new(
        ActivityType::Training,
        ctx.today,
        distance_km,
        total_sec,
        ctx.now,
    );
    activity.workout_categories = vec![WorkoutCategory::Intervals];
    activity.note = lines.join("\n");

    tracing::debug!(
        laps = lines.len(),
        skipped,
        distance_km,
        duration_sec = total_sec,
        "Aggregated split file"
    );

    LapAggregate {
        activity,
        laps: lines.len(),
        skipped,
    }
}

fn is_summary_row(lap: &str) -> bool {
    garmin::SUMMARY_LAP_LABELS
        .iter()
        .any(|label| label.eq_ignore_ascii_case(lap))
}
