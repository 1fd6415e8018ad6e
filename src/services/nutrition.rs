// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition item import from assistant-generated JSON.
//!
//! Chat assistants are asked for a bare JSON array but often wrap it in a
//! Markdown code fence anyway, so fences are stripped before parsing.

use crate::models::{NutritionItem, NutritionType};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum NutritionImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON array of nutrition items")]
    NotAnArray,
}

/// Items parsed from an import, plus how many entries were dropped.
#[derive(Debug)]
pub struct ParsedNutrition {
    pub items: Vec<NutritionItem>,
    pub skipped: usize,
}

/// Parse a JSON array of nutrition items. Entries that are not objects or
/// have no `name` are skipped.
pub fn parse_ai_json(text: &str) -> Result<ParsedNutrition, NutritionImportError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    let Value::Array(entries) = value else {
        return Err(NutritionImportError::NotAnArray);
    };

    let total = entries.len();
    let items: Vec<NutritionItem> = entries
        .iter()
        .filter_map(|entry| entry.as_object().and_then(item_from_object))
        .collect();

    Ok(ParsedNutrition {
        skipped: total - items.len(),
        items,
    })
}

fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix("```") {
        // Language tag, if any, runs to the end of the first line
        s = match rest.split_once('\n') {
            Some((tag, body)) if !tag.trim_start().starts_with('[') => body,
            _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

fn item_from_object(obj: &Map<String, Value>) -> Option<NutritionItem> {
    let name = text_field(obj, "name");
    if name.is_empty() {
        return None;
    }

    Some(NutritionItem {
        name,
        brand: text_field(obj, "brand"),
        item_type: obj
            .get("type")
            .and_then(Value::as_str)
            .map(parse_type)
            .unwrap_or_default(),
        energy_kcal: number_field(obj, "energyKcal"),
        sodium_mg: number_field(obj, "sodiumMg"),
        carb_g: number_field(obj, "carbG"),
        note: text_field(obj, "note"),
    })
}

fn parse_type(raw: &str) -> NutritionType {
    match raw.trim().to_ascii_lowercase().as_str() {
        "gel" => NutritionType::Gel,
        "drink" => NutritionType::Drink,
        "bar" => NutritionType::Bar,
        _ => NutritionType::Other,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numbers may arrive as JSON numbers or as strings like "100 kcal".
fn number_field(obj: &Map<String, Value>, key: &str) -> f64 {
    let value = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => crate::import::parse::parse_leading_float(s),
        _ => None,
    };
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}
