//! Grouping of raw association rows into per-disease aggregates.

use std::collections::HashMap;

use autoab_common::BiomarkerAssociation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::percent::parse_percent;

/// Association strength used when a row has no parseable value.
pub const DEFAULT_ASSOCIATION: f64 = 5.0;
/// Manifestation prevalence used when a row has no parseable value.
pub const DEFAULT_PREVALENCE: f64 = 50.0;
pub const UNKNOWN_DISEASE: &str = "Unknown";

const ASSOCIATION_KEY: &str = "Disease Association";
const MANIFESTATION_KEY: &str = "Clinical Manifestation";
const PREVALENCE_KEYS: [&str; 2] = ["Prevalence", "prevalence"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifestation {
    pub name: String,
    pub prevalence: f64,
    /// Source text when the row had one, otherwise `"{prevalence}%"`.
    pub prevalence_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseGroup {
    pub name: String,
    /// Highest association seen across the disease's rows.
    pub association: f64,
    pub manifestations: Vec<Manifestation>,
}

impl DiseaseGroup {
    fn new(name: String, association: f64) -> Self {
        Self { name, association, manifestations: Vec::new() }
    }

    /// Keep one manifestation per name, the one with the highest prevalence.
    /// Equal prevalences keep the smaller display string so the result does
    /// not depend on row order.
    fn merge_manifestation(&mut self, candidate: Manifestation) {
        match self.manifestations.iter_mut().find(|m| m.name == candidate.name) {
            Some(existing) => {
                let better = candidate.prevalence > existing.prevalence
                    || (candidate.prevalence == existing.prevalence
                        && candidate.prevalence_display < existing.prevalence_display);
                if better {
                    *existing = candidate;
                }
            }
            None => self.manifestations.push(candidate),
        }
    }
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

pub fn resolve_disease(row: &BiomarkerAssociation) -> String {
    row.raw_str("Disease")
        .or_else(|| row.raw_str("disease"))
        .or_else(|| row.disease.as_deref().map(str::trim).filter(|d| !d.is_empty()))
        .unwrap_or(UNKNOWN_DISEASE)
        .to_string()
}

pub fn resolve_association(row: &BiomarkerAssociation) -> f64 {
    row.raw_value(ASSOCIATION_KEY)
        .and_then(parse_percent)
        .unwrap_or(DEFAULT_ASSOCIATION)
}

pub fn resolve_manifestation_name(row: &BiomarkerAssociation) -> Option<String> {
    row.manifestation
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .or_else(|| row.raw_str(MANIFESTATION_KEY))
        .map(str::to_string)
}

/// Canonical prevalence fields first, then any raw column whose header
/// mentions "preval".
fn prevalence_source(row: &BiomarkerAssociation) -> Option<&Value> {
    if let Some(v) = row.prevalence.as_ref().filter(|v| !v.is_null()) {
        return Some(v);
    }
    if let Some(v) = PREVALENCE_KEYS.iter().find_map(|k| row.raw_value(k)) {
        return Some(v);
    }
    row.raw
        .iter()
        .find(|(key, value)| key.to_lowercase().contains("preval") && !value.is_null())
        .map(|(_, value)| value)
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

/// Prevalence and its display string for a row.
pub fn resolve_prevalence(row: &BiomarkerAssociation) -> (f64, String) {
    let source = prevalence_source(row);
    let prevalence = source.and_then(parse_percent).unwrap_or(DEFAULT_PREVALENCE);
    let display = source
        .and_then(display_text)
        .unwrap_or_else(|| format_percent(prevalence));
    (prevalence, display)
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Aggregate rows per disease, in first-seen disease order.
pub fn group_associations(rows: &[BiomarkerAssociation]) -> Vec<DiseaseGroup> {
    let mut groups: Vec<DiseaseGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let disease = resolve_disease(row);
        let association = resolve_association(row);

        let slot = *index.entry(disease.clone()).or_insert_with(|| {
            groups.push(DiseaseGroup::new(disease, association));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.association = group.association.max(association);

        if let Some(name) = resolve_manifestation_name(row) {
            let (prevalence, prevalence_display) = resolve_prevalence(row);
            group.merge_manifestation(Manifestation { name, prevalence, prevalence_display });
        }
    }

    groups
}
