// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Column-name vocabulary of the supported export formats.
//!
//! Garmin Connect exports use English or Traditional Chinese headers
//! depending on the account language; synonyms are listed together.

/// Lap-number column (Garmin split export).
pub const LAP: &[&str] = &["Laps", "圈數"];

/// Activity-type column (Garmin activity list).
pub const ACTIVITY_TYPE: &[&str] = &["Activity Type", "活動類型"];

/// Race-name columns (legacy race spreadsheet).
pub const RACE_NAME: &[&str] = &["比賽名稱", "Race Name"];

/// Legacy race spreadsheet columns.
pub mod legacy {
    pub const RACE_DATE: &str = "比賽日期";
    pub const RACE_NAME_ZH: &str = "比賽名稱";
    pub const RACE_NAME_EN: &str = "Race Name";
    pub const DISTANCE: &str = "距離";
    pub const FINISH_TIME: &str = "完成時間";
    pub const LOCATION: &str = "地點";
    pub const NOTE: &str = "備註";
    pub const FEE: &str = "費用";
    pub const ORGANIZER: &str = "主辦單位";
    pub const START_TIME: &str = "起步時間";
    pub const CATEGORY: &str = "賽事組別";
    pub const BIB_NUMBER: &str = "參賽編號";
    pub const PARTICIPANT: &str = "參賽者";
    pub const TEMPERATURE: &str = "溫度";
    pub const RANK_CATEGORY: &str = "組別名次";
    pub const RANK_OVERALL: &str = "總名次";
}

/// Garmin Connect columns shared by the activity-list and split exports.
pub mod garmin {
    pub const DATE: &[&str] = &["Date", "日期"];
    pub const TITLE: &[&str] = &["Title", "標題"];
    pub const DISTANCE: &[&str] = &["Distance", "距離"];
    pub const TIME: &[&str] = &["Time", "時間"];
    pub const AVG_PACE: &[&str] = &["Avg Pace", "平均配速"];
    pub const AVG_HR: &[&str] = &["Avg HR", "平均心率"];

    /// Lap values marking the trailing totals row of a split export.
    pub const SUMMARY_LAP_LABELS: &[&str] = &["Summary", "摘要", "總計"];

    /// Placeholder Garmin writes for metrics it has no value for.
    pub const NO_VALUE: &str = "--";
}

/// True if any of `names` appears in `headers`.
pub fn contains_any<S: AsRef<str>>(headers: &[S], names: &[&str]) -> bool {
    headers
        .iter()
        .any(|header| names.contains(&header.as_ref().trim()))
}
