// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race distance classification (FM / HM / 10K / 5K / other).

use crate::models::DistanceCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const FULL_MARATHON_KM: f64 = 42.195;
const HALF_MARATHON_KM: f64 = 21.0975;
const MARATHON_TOLERANCE_KM: f64 = 2.0;
const SHORT_RACE_TOLERANCE_KM: f64 = 1.0;

/// How legacy race rows derive their distance category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Classify the parsed kilometers with a tolerance window.
    #[default]
    Numeric,
    /// Substring match on the raw distance text.
    ///
    /// Deprecated: order-sensitive and misclassifies e.g. `"15km"` as 5K.
    /// Kept only to reproduce older imports.
    Substring,
}

impl CategoryPolicy {
    /// Classify a legacy distance cell. `raw` is `None` when the cell is absent.
    pub fn classify(self, raw: Option<&str>, km: f64) -> DistanceCategory {
        match self {
            CategoryPolicy::Numeric => classify_distance_km(km),
            CategoryPolicy::Substring => raw
                .map(classify_distance_text)
                .unwrap_or(DistanceCategory::Other),
        }
    }
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(CategoryPolicy::Numeric),
            "substring" => Ok(CategoryPolicy::Substring),
            other => Err(format!("unknown category policy '{}'", other)),
        }
    }
}

/// Classify by distance: within 2 km of a marathon/half, within 1 km of 10K/5K.
pub fn classify_distance_km(km: f64) -> DistanceCategory {
    if (km - FULL_MARATHON_KM).abs() < MARATHON_TOLERANCE_KM {
        DistanceCategory::FullMarathon
    } else if (km - HALF_MARATHON_KM).abs() < MARATHON_TOLERANCE_KM {
        DistanceCategory::HalfMarathon
    } else if (km - 10.0).abs() < SHORT_RACE_TOLERANCE_KM {
        DistanceCategory::TenK
    } else if (km - 5.0).abs() < SHORT_RACE_TOLERANCE_KM {
        DistanceCategory::FiveK
    } else {
        DistanceCategory::Other
    }
}

/// Classify by substring of the raw distance text, first match wins.
pub fn classify_distance_text(raw: &str) -> DistanceCategory {
    if raw.contains("42.195") {
        DistanceCategory::FullMarathon
    } else if raw.contains("21") {
        DistanceCategory::HalfMarathon
    } else if raw.contains("10") {
        DistanceCategory::TenK
    } else if raw.contains('5') {
        DistanceCategory::FiveK
    } else {
        DistanceCategory::Other
    }
}
