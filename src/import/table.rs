// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uploaded CSV text as a header list plus header → value rows.

use super::ImportError;
use std::collections::HashMap;

const UTF8_BOM: char = '\u{feff}';

/// One data row keyed by column header. Values are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(HashMap<String, String>);

impl RawRow {
    /// Trimmed value of `header`, or `None` when the column is absent or blank.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .get(header)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-blank value among synonymous headers.
    pub fn first(&self, headers: &[&str]) -> Option<&str> {
        headers.iter().find_map(|h| self.get(h))
    }
}

/// A header that appears more than once keeps its first non-blank value.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values: HashMap<String, String> = HashMap::new();
        for (k, v) in iter {
            let value = v.into();
            let slot = values.entry(k.into()).or_default();
            if slot.trim().is_empty() {
                *slot = value;
            }
        }
        Self(values)
    }
}

/// Parsed upload: headers in file order and one `RawRow` per record.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl CsvTable {
    /// Parse CSV text. The first record is the header row.
    ///
    /// Records shorter than the header row simply lack the trailing columns;
    /// fully blank records are dropped.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::InvalidCsv(e.to_string()))?
            .iter()
            .map(|h| h.trim_start_matches(UTF8_BOM).trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::InvalidCsv("missing header row".to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ImportError::InvalidCsv(e.to_string()))?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect();
            rows.push(row);
        }

        tracing::debug!(
            columns = headers.len(),
            rows = rows.len(),
            "Parsed CSV upload"
        );

        Ok(Self { headers, rows })
    }
}
