// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canonical activity record shared by imports, manual entry and storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const KM_PER_MILE: f64 = 1.609_344;

/// Activity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Training,
    Race,
    Cross,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Training => "training",
            ActivityType::Race => "race",
            ActivityType::Cross => "cross",
        }
    }
}

/// Coarse race-distance bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DistanceCategory {
    #[serde(rename = "FM")]
    FullMarathon,
    #[serde(rename = "HM")]
    HalfMarathon,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "other")]
    Other,
}

/// Unit the distance was originally entered or exported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    /// Convert a value in this unit to kilometers.
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Km => value,
            DistanceUnit::Mi => value * KM_PER_MILE,
        }
    }
}

/// Workout tags used for filtering training sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutCategory {
    Easy,
    Long,
    Tempo,
    Intervals,
    Recovery,
    Race,
}

/// Race-only fields. Absent on training and cross-training records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RaceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_category: Option<DistanceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_time_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_time_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip_time_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip_time_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_category: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_overall: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bib_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_raw: Option<String>,
    /// Race-day temperature in °C (`null` when unknown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

/// One training, race or cross-training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Calendar date (YYYY-MM-DD), no time of day
    pub date: NaiveDate,
    pub distance_km: f64,
    /// Distance as entered, in `distance_input_unit`
    pub distance_input_value: f64,
    pub distance_input_unit: DistanceUnit,
    pub duration_sec: u64,
    /// Perceived exertion 0-10 (0 = not recorded)
    #[serde(default)]
    pub rpe: u8,
    #[serde(default)]
    pub workout_categories: Vec<WorkoutCategory>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub workout_title: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location_map_url: String,
    #[serde(flatten)]
    pub race: RaceDetails,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Build a record with the required fields set and everything else empty.
    ///
    /// The distance is recorded in kilometers.
    pub fn new(
        activity_type: ActivityType,
        date: NaiveDate,
        distance_km: f64,
        duration_sec: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            activity_type,
            date,
            distance_km,
            distance_input_value: distance_km,
            distance_input_unit: DistanceUnit::Km,
            duration_sec,
            rpe: 0,
            workout_categories: Vec::new(),
            note: String::new(),
            workout_title: String::new(),
            location_name: String::new(),
            location_map_url: String::new(),
            race: RaceDetails::default(),
            created_at,
            updated_at: None,
        }
    }
}

/// Stored activity document (`activities` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDocument {
    /// Document ID
    pub id: String,
    /// User that owns the record
    pub owner_uid: String,
    #[serde(flatten)]
    pub activity: Activity,
}

/// Manual-entry payload for creating or editing an activity.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub distance_input_value: f64,
    #[serde(default)]
    pub distance_input_unit: DistanceUnit,
    /// At most one week of elapsed time
    #[validate(range(max = 604_800))]
    pub duration_sec: u64,
    #[serde(default)]
    #[validate(range(max = 10))]
    pub rpe: u8,
    #[serde(default)]
    pub workout_categories: Vec<WorkoutCategory>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub workout_title: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location_name: String,
    #[serde(default)]
    #[validate(url)]
    pub location_map_url: Option<String>,
    #[serde(flatten)]
    pub race: RaceDetails,
}

impl ActivityInput {
    /// Create a new record from this input.
    pub fn into_activity(self, now: DateTime<Utc>) -> Activity {
        let mut activity = Activity::new(self.activity_type, self.date, 0.0, 0, now);
        self.apply_to(&mut activity);
        activity
    }

    /// Overwrite the editable fields of `activity`, leaving `created_at` alone.
    pub fn apply_to(self, activity: &mut Activity) {
        let distance_km = self.distance_input_unit.to_km(self.distance_input_value);

        activity.activity_type = self.activity_type;
        activity.date = self.date;
        activity.distance_km = distance_km;
        activity.distance_input_value = self.distance_input_value;
        activity.distance_input_unit = self.distance_input_unit;
        activity.duration_sec = self.duration_sec;
        activity.rpe = self.rpe;
        activity.workout_categories = self.workout_categories;
        activity.note = self.note;
        activity.workout_title = self.workout_title;
        activity.location_name = self.location_name;
        activity.location_map_url = self.location_map_url.unwrap_or_default();
        activity.race = self.race;

        if activity.activity_type == ActivityType::Race && activity.race.distance_category.is_none()
        {
            activity.race.distance_category =
                Some(crate::import::category::classify_distance_km(distance_km));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_serializes_camel_case_with_flat_race_fields() {
        let mut activity = Activity::new(
            ActivityType::Race,
            date("2024-03-10"),
            21.0975,
            5400,
            Utc::now(),
        );
        activity.race.race_name = Some("Taipei Half".to_string());
        activity.race.distance_category = Some(DistanceCategory::HalfMarathon);

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "race");
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["distanceKm"], 21.0975);
        assert_eq!(json["distanceInputUnit"], "km");
        assert_eq!(json["durationSec"], 5400);
        assert_eq!(json["raceName"], "Taipei Half");
        assert_eq!(json["distanceCategory"], "HM");
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("temperatureC").is_none());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = ActivityDocument {
            id: "abc".to_string(),
            owner_uid: "user-1".to_string(),
            activity: Activity::new(
                ActivityType::Cross,
                date("2024-01-02"),
                30.0,
                3600,
                Utc::now(),
            ),
        };

        let json = serde_json::to_string(&doc).unwrap();
        let back: ActivityDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_input_converts_miles() {
        let input: ActivityInput = serde_json::from_value(serde_json::json!({
            "type": "training",
            "date": "2024-05-01",
            "distanceInputValue": 10.0,
            "distanceInputUnit": "mi",
            "durationSec": 4800
        }))
        .unwrap();

        let activity = input.into_activity(Utc::now());
        assert!((activity.distance_km - 16.09344).abs() < 1e-9);
        assert_eq!(activity.distance_input_value, 10.0);
        assert_eq!(activity.distance_input_unit, DistanceUnit::Mi);
    }

    #[test]
    fn test_input_race_gets_category() {
        let input: ActivityInput = serde_json::from_value(serde_json::json!({
            "type": "race",
            "date": "2024-11-17",
            "distanceInputValue": 42.195,
            "durationSec": 12600,
            "raceName": "Fubon Taipei Marathon"
        }))
        .unwrap();

        let activity = input.into_activity(Utc::now());
        assert_eq!(
            activity.race.distance_category,
            Some(DistanceCategory::FullMarathon)
        );
        assert_eq!(
            activity.race.race_name.as_deref(),
            Some("Fubon Taipei Marathon")
        );
    }

    #[test]
    fn test_input_validation_rejects_rpe_out_of_range() {
        let input: ActivityInput = serde_json::from_value(serde_json::json!({
            "type": "training",
            "date": "2024-05-01",
            "distanceInputValue": 5.0,
            "durationSec": 1500,
            "rpe": 11
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_created_at() {
        let created = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut activity =
            Activity::new(ActivityType::Training, date("2024-01-01"), 5.0, 1500, created);

        let input: ActivityInput = serde_json::from_value(serde_json::json!({
            "type": "training",
            "date": "2024-01-02",
            "distanceInputValue": 8.0,
            "durationSec": 2400
        }))
        .unwrap();
        input.apply_to(&mut activity);

        assert_eq!(activity.created_at, created);
        assert_eq!(activity.date, date("2024-01-02"));
        assert_eq!(activity.distance_km, 8.0);
    }
}
