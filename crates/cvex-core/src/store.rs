//! Session-scoped accumulation and export of extracted records.

use std::collections::HashMap;

use crate::error::ExportError;
use crate::models::record::ResumeRecord;

/// Ordered, append-only collection of extracted records.
///
/// Insertion order is the only key: there is no deduplication, so processing
/// the same document twice yields two independent entries. The store lives
/// for one session and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<ResumeRecord>,
}

/// Aggregate statistics over a non-empty store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary {
    /// Number of records in the store.
    pub total: usize,

    /// Arithmetic mean of `experience_years` across all records.
    pub mean_experience_years: f64,

    /// Most frequent skill across all records, ties broken by the first
    /// maximal skill encountered. `None` when no record lists any skill.
    pub top_skill: Option<String>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single record.
    pub fn push(&mut self, record: ResumeRecord) {
        self.records.push(record);
    }

    /// Append many records, preserving their order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = ResumeRecord>) {
        self.records.extend(records);
    }

    /// Drop all records. Appending afterwards behaves exactly like appending
    /// to a fresh store.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[ResumeRecord] {
        &self.records
    }

    /// Export as a pretty-printed JSON array (2-space indentation).
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Export as CSV: one row per record, header derived from the union of
    /// keys across all records (`source_file` appears only if some record
    /// has one). The `skills` list is written as its `{:?}` rendering in a
    /// single cell, not split into columns.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        let with_source = self.records.iter().any(|r| r.source_file.is_some());

        let mut header = vec!["name", "email", "skills", "experience_years"];
        if with_source {
            header.push("source_file");
        }
        wtr.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![
                record.name.clone(),
                record.email.clone(),
                format!("{:?}", record.skills),
                record.experience_years.to_string(),
            ];
            if with_source {
                row.push(record.source_file.clone().unwrap_or_default());
            }
            wtr.write_record(&row)?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| ExportError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8(data)?)
    }

    /// Compute summary statistics, or `None` for an empty store.
    pub fn summary(&self) -> Option<StoreSummary> {
        if self.records.is_empty() {
            return None;
        }

        let total = self.records.len();
        let mean_experience_years = self
            .records
            .iter()
            .map(|r| r.experience_years)
            .sum::<f64>()
            / total as f64;

        // Count skills while remembering first-occurrence order so ties go
        // to the earliest skill seen.
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for skill in self.records.iter().flat_map(|r| r.skills.iter()) {
            let count = counts.entry(skill.as_str()).or_insert(0);
            if *count == 0 {
                order.push(skill.as_str());
            }
            *count += 1;
        }

        let mut top: Option<(&str, usize)> = None;
        for name in order {
            let count = counts[name];
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((name, count));
            }
        }

        Some(StoreSummary {
            total,
            mean_experience_years,
            top_skill: top.map(|(name, _)| name.to_string()),
        })
    }
}
