// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Legacy race-history spreadsheet → race activities.

use super::headers::legacy as col;
use super::parse::{
    normalize_date, parse_leading_float, parse_leading_int, parse_stripped_distance,
    parse_time_to_sec,
};
use super::table::RawRow;
use super::ImportContext;
use crate::models::{Activity, ActivityType, RaceDetails};

/// Convert one spreadsheet row. Rows without a race name are not data rows.
pub fn convert_row(row: &RawRow, ctx: &ImportContext) -> Option<Activity> {
    let race_name = row.get(col::RACE_NAME_EN);
    let race_name_zh = row.get(col::RACE_NAME_ZH);
    if race_name.is_none() && race_name_zh.is_none() {
        return None;
    }

    let raw_distance = row.get(col::DISTANCE);
    let distance_km = raw_distance.map(parse_stripped_distance).unwrap_or(0.0);

    let finish_time = row.get(col::FINISH_TIME).unwrap_or_default();
    let finish_sec = parse_time_to_sec(finish_time);

    let date = match row.get(col::RACE_DATE) {
        Some(raw) => normalize_date(raw).unwrap_or_else(|| {
            tracing::warn!(value = raw, "Unparseable race date, using today");
            ctx.today
        }),
        None => ctx.today,
    };

    let text = |header: &str| Some(row.get(header).unwrap_or_default().to_string());
    let rank = |header: &str| {
        Some(
            row.get(header)
                .and_then(parse_leading_int)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0),
        )
    };

    let mut activity = Activity::new(ActivityType::Race, date, distance_km, finish_sec, ctx.now);
    activity.location_name = row.get(col::LOCATION).unwrap_or_default().to_string();
    activity.note = row.get(col::NOTE).unwrap_or_default().to_string();
    activity.race = RaceDetails {
        race_name: Some(race_name.unwrap_or_default().to_string()),
        race_name_zh: Some(race_name_zh.unwrap_or_default().to_string()),
        distance_category: Some(ctx.category_policy.classify(raw_distance, distance_km)),
        official_time_str: Some(finish_time.to_string()),
        official_time_sec: Some(finish_sec),
        // No separate chip-time column: chip time is the official time.
        chip_time_str: Some(finish_time.to_string()),
        chip_time_sec: Some(finish_sec),
        rank_category: rank(col::RANK_CATEGORY),
        rank_overall: rank(col::RANK_OVERALL),
        organizer: text(col::ORGANIZER),
        start_time: text(col::START_TIME),
        category_name: text(col::CATEGORY),
        bib_number: text(col::BIB_NUMBER),
        participant_name: text(col::PARTICIPANT),
        fee_raw: text(col::FEE),
        temperature_c: row.get(col::TEMPERATURE).and_then(parse_leading_float),
    };

    Some(activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::CategoryPolicy;
    use crate::models::DistanceCategory;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ctx(policy: CategoryPolicy) -> ImportContext {
        ImportContext {
            today: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            now: Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap(),
            category_policy: policy,
        }
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_full_row_mapping() {
        let row = row(&[
            ("比賽日期", "2023-12-17"),
            ("比賽名稱", "臺北馬拉松"),
            ("Race Name", "Taipei Marathon"),
            ("距離", "21 km"),
            ("完成時間", "1:45:30"),
            ("地點", "台北市政府"),
            ("備註", "PB"),
            ("費用", "NT$1200"),
            ("主辦單位", "台北市政府體育局"),
            ("起步時間", "06:30"),
            ("賽事組別", "半程馬拉松"),
            ("參賽編號", "H1234"),
            ("參賽者", "王小明"),
            ("溫度", "18°C"),
            ("組別名次", "15"),
            ("總名次", "320"),
        ]);

        let a = convert_row(&row, &ctx(CategoryPolicy::Numeric)).unwrap();

        assert_eq!(a.activity_type, ActivityType::Race);
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2023, 12, 17).unwrap());
        assert_eq!(a.distance_km, 21.0);
        assert_eq!(a.distance_input_value, 21.0);
        assert_eq!(a.duration_sec, 6330);
        assert_eq!(a.location_name, "台北市政府");
        assert_eq!(a.note, "PB");
        assert_eq!(a.location_map_url, "");
        assert_eq!(a.rpe, 0);

        let r = &a.race;
        assert_eq!(r.race_name.as_deref(), Some("Taipei Marathon"));
        assert_eq!(r.race_name_zh.as_deref(), Some("臺北馬拉松"));
        assert_eq!(r.distance_category, Some(DistanceCategory::HalfMarathon));
        assert_eq!(r.official_time_str.as_deref(), Some("1:45:30"));
        assert_eq!(r.official_time_sec, Some(6330));
        assert_eq!(r.chip_time_str, r.official_time_str);
        assert_eq!(r.chip_time_sec, r.official_time_sec);
        assert_eq!(r.rank_category, Some(15));
        assert_eq!(r.rank_overall, Some(320));
        assert_eq!(r.organizer.as_deref(), Some("台北市政府體育局"));
        assert_eq!(r.start_time.as_deref(), Some("06:30"));
        assert_eq!(r.category_name.as_deref(), Some("半程馬拉松"));
        assert_eq!(r.bib_number.as_deref(), Some("H1234"));
        assert_eq!(r.participant_name.as_deref(), Some("王小明"));
        assert_eq!(r.fee_raw.as_deref(), Some("NT$1200"));
        assert_eq!(r.temperature_c, Some(18.0));
        assert_eq!(a.created_at, ctx(CategoryPolicy::Numeric).now);
    }

    #[test]
    fn test_missing_fields_use_zero_values() {
        let row = row(&[("比賽名稱", "小型路跑")]);
        let context = ctx(CategoryPolicy::Numeric);

        let a = convert_row(&row, &context).unwrap();

        assert_eq!(a.date, context.today);
        assert_eq!(a.distance_km, 0.0);
        assert_eq!(a.duration_sec, 0);
        assert_eq!(a.race.race_name.as_deref(), Some(""));
        assert_eq!(a.race.official_time_str.as_deref(), Some(""));
        assert_eq!(a.race.rank_overall, Some(0));
        assert_eq!(a.race.temperature_c, None);
        assert_eq!(a.race.distance_category, Some(DistanceCategory::Other));
    }

    #[test]
    fn test_row_without_race_name_is_skipped() {
        let row = row(&[("比賽日期", "2023-01-01"), ("距離", "10K")]);
        assert!(convert_row(&row, &ctx(CategoryPolicy::Numeric)).is_none());
    }

    #[test]
    fn test_english_race_name_alone_is_enough() {
        let row = row(&[("Race Name", "Osaka Marathon"), ("距離", "42.195")]);
        let a = convert_row(&row, &ctx(CategoryPolicy::Numeric)).unwrap();

        assert_eq!(a.race.race_name_zh.as_deref(), Some(""));
        assert_eq!(
            a.race.distance_category,
            Some(DistanceCategory::FullMarathon)
        );
    }

    #[test]
    fn test_substring_policy_applies_to_raw_text() {
        let row = row(&[("比賽名稱", "城市路跑"), ("距離", "15km")]);

        let numeric = convert_row(&row, &ctx(CategoryPolicy::Numeric)).unwrap();
        let substring = convert_row(&row, &ctx(CategoryPolicy::Substring)).unwrap();

        assert_eq!(
            numeric.race.distance_category,
            Some(DistanceCategory::Other)
        );
        assert_eq!(
            substring.race.distance_category,
            Some(DistanceCategory::FiveK)
        );
    }

    #[test]
    fn test_malformed_numbers_degrade() {
        let row = row(&[
            ("比賽名稱", "越野賽"),
            ("完成時間", "DNF"),
            ("溫度", "hot"),
            ("總名次", "N/A"),
            ("比賽日期", "sometime"),
        ]);
        let context = ctx(CategoryPolicy::Numeric);

        let a = convert_row(&row, &context).unwrap();

        assert_eq!(a.duration_sec, 0);
        assert_eq!(a.race.official_time_str.as_deref(), Some("DNF"));
        assert_eq!(a.race.temperature_c, None);
        assert_eq!(a.race.rank_overall, Some(0));
        assert_eq!(a.date, context.today);
    }
}
