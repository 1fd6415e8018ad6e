// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod nutrition;

pub use activity::{
    Activity, ActivityDocument, ActivityInput, ActivityType, DistanceCategory, DistanceUnit,
    RaceDetails, WorkoutCategory,
};
pub use nutrition::{NutritionDocument, NutritionItem, NutritionType};
