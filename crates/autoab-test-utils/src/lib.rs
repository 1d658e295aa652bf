//! Shared fixtures for autoab tests.
//!
//! Fixture data is a small, hand-checked slice of the portal's entry table and
//! of the biomarker search results for Anti-Ro52.

use autoab_common::{BiomarkerAssociation, Entry};
use serde_json::{json, Value};

pub use pretty_assertions;

/// Build an entry with every facet field set.
pub fn entry(
    id: &str,
    disease: &str,
    autoantibody: &str,
    autoantigen: &str,
    epitope: &str,
    kind: &str,
    uniprot_id: &str,
) -> Entry {
    Entry {
        id: id.to_string(),
        disease: disease.to_string(),
        autoantibody: autoantibody.to_string(),
        autoantigen: autoantigen.to_string(),
        epitope: epitope.to_string(),
        kind: kind.to_string(),
        uniprot_id: uniprot_id.to_string(),
        extra: Default::default(),
    }
}

/// Eight entries spanning three primaries and a few refinements.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        entry("e1", "SLE", "Anti-Ro52", "TRIM21", "coiled-coil", "IgG", "P19474"),
        entry("e2", "SLE", "Anti-dsDNA", "dsDNA", "", "IgG", ""),
        entry("e3", "Sjogren syndrome", "Anti-Ro52", "TRIM21", "RING", "IgG", "P19474"),
        entry("e4", "Sjogren syndrome", "Anti-La", "SSB", "", "IgM", "P05455"),
        entry("e5", "Myositis", "Anti-Jo1", "HARS1", "N-terminal", "IgG", "P12081"),
        entry("e6", "Myositis", "Anti-Ro52", "TRIM21", "coiled-coil", "IgA", "P19474"),
        entry("e7", "Systemic sclerosis", "Anti-Scl70", "TOP1", "", "IgG", "P11387"),
        entry("e8", "SLE", "Anti-Sm", "SNRPB", "", "IgG", "P14678"),
    ]
}

/// Build an association from a subject name and its raw spreadsheet row.
pub fn association(name: &str, raw: Value) -> BiomarkerAssociation {
    let raw = match raw {
        Value::Object(map) => map,
        _ => Default::default(),
    };
    BiomarkerAssociation { name: name.to_string(), raw, ..Default::default() }
}

/// Search rows for Anti-Ro52 across three diseases.
pub fn ro52_associations() -> Vec<BiomarkerAssociation> {
    vec![
        association("Anti-Ro52", json!({
            "Disease": "SLE",
            "Disease Association": "45-55",
            "Clinical Manifestation": "Rash",
            "Prevalence": "0.6"
        })),
        association("Anti-Ro52", json!({
            "Disease": "SLE",
            "Disease Association": "30",
            "Clinical Manifestation": "Rash",
            "Prevalence": "55%"
        })),
        association("Anti-Ro52", json!({
            "Disease": "SLE",
            "Disease Association": "40%",
            "Clinical Manifestation": "Photosensitivity",
            "Prevalence": "~35"
        })),
        association("Anti-Ro52", json!({
            "Disease": "Sjogren syndrome",
            "Disease Association": "70",
            "Clinical Manifestation": "Dry eyes",
            "Prevalence of symptom": "80%"
        })),
        association("Anti-Ro52", json!({
            "disease": "Myositis",
            "Disease Association": "unknown"
        })),
    ]
}
