// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Race-nutrition product model (gels, drinks, bars).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum NutritionType {
    #[default]
    Gel,
    Drink,
    Bar,
    Other,
}

/// Nutrition product as entered by the user or an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct NutritionItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub brand: String,
    #[serde(rename = "type", default)]
    pub item_type: NutritionType,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub energy_kcal: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub sodium_mg: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub carb_g: f64,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub note: String,
}

/// Stored nutrition document (`nutrition_db` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDocument {
    pub id: String,
    pub owner_uid: String,
    #[serde(flatten)]
    pub item: NutritionItem,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
