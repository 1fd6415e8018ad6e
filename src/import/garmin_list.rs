// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin Connect activity-list export → one activity per row.

use super::category::classify_distance_km;
use super::headers::{garmin, ACTIVITY_TYPE};
use super::parse::{normalize_date, parse_grouped_number, parse_time_to_sec};
use super::table::RawRow;
use super::ImportContext;
use crate::models::{Activity, ActivityType};

/// Garmin activity-type labels with a non-default mapping.
/// Anything not listed is treated as training.
const ACTIVITY_TYPE_TABLE: &[(&str, ActivityType)] = &[
    ("Running", ActivityType::Training),
    ("Treadmill Running", ActivityType::Training),
    ("Trail Running", ActivityType::Training),
    ("Track Running", ActivityType::Training),
    ("跑步", ActivityType::Training),
    ("跑步機跑步", ActivityType::Training),
    ("越野跑", ActivityType::Training),
    ("田徑場跑步", ActivityType::Training),
    ("Street Running", ActivityType::Race),
    ("路跑", ActivityType::Race),
    ("Cycling", ActivityType::Cross),
    ("Road Cycling", ActivityType::Cross),
    ("Indoor Cycling", ActivityType::Cross),
    ("Pool Swim", ActivityType::Cross),
    ("Lap Swimming", ActivityType::Cross),
    ("騎自行車", ActivityType::Cross),
    ("室內騎自行車", ActivityType::Cross),
    ("泳池游泳", ActivityType::Cross),
];

/// Map a Garmin activity-type label to an activity type.
pub fn map_activity_type(label: &str) -> ActivityType {
    let label = label.trim();
    ACTIVITY_TYPE_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, activity_type)| *activity_type)
        .unwrap_or(ActivityType::Training)
}

/// Convert one list row. Rows without an activity type are not data rows.
pub fn convert_row(row: &RawRow, ctx: &ImportContext) -> Option<Activity> {
    let label = row.first(ACTIVITY_TYPE)?;
    let activity_type = map_activity_type(label);

    let date = row
        .first(garmin::DATE)
        .and_then(normalize_date)
        .unwrap_or(ctx.today);
    let distance_km = row
        .first(garmin::DISTANCE)
        .map(parse_grouped_number)
        .unwrap_or(0.0);
    let duration_sec = row
        .first(garmin::TIME)
        .map(parse_time_to_sec)
        .unwrap_or(0);

    let mut activity = Activity::new(activity_type, date, distance_km, duration_sec, ctx.now);
    activity.workout_title = row
        .first(garmin::TITLE)
        .unwrap_or_default()
        .to_string();
    activity.note = build_note(row.first(garmin::AVG_PACE), row.first(garmin::AVG_HR));

    if activity_type == ActivityType::Race {
        activity.race.distance_category = Some(classify_distance_km(distance_km));
    }

    Some(activity)
}

/// Human-readable pace/heart-rate summary. Garmin's `--` counts as missing.
fn build_note(avg_pace: Option<&str>, avg_hr: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(pace) = avg_pace.filter(|v| *v != garmin::NO_VALUE) {
        parts.push(format!("Avg Pace: {}", pace));
    }
    if let Some(hr) = avg_hr.filter(|v| *v != garmin::NO_VALUE) {
        parts.push(format!("Avg HR: {}", hr));
    }
    parts.join(", ")
}
