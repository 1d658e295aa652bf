//! Single-slot memo for the last computed layout.
//!
//! Keyed on a SHA-256 of the association rows plus the subject and selected
//! disease, so a re-render with unchanged inputs skips regrouping.

use autoab_common::BiomarkerAssociation;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::layout::{compute_layout, NetworkLayout};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    rows_hash: String,
    subject: String,
    selected: Option<String>,
}

#[derive(Debug, Default)]
pub struct LayoutCache {
    slot: Option<(CacheKey, NetworkLayout)>,
    hits: u64,
    misses: u64,
}

/// Hex SHA-256 of the rows' JSON encoding.
pub fn rows_fingerprint(rows: &[BiomarkerAssociation]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        // Serialising plain data into a Vec cannot fail.
        let bytes = serde_json::to_vec(row).unwrap_or_default();
        hasher.update(&bytes);
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(
        &mut self,
        subject: &str,
        rows: &[BiomarkerAssociation],
        selected_disease: Option<&str>,
    ) -> &NetworkLayout {
        let key = CacheKey {
            rows_hash: rows_fingerprint(rows),
            subject: subject.to_string(),
            selected: selected_disease.map(str::to_string),
        };

        if self.slot.as_ref().is_some_and(|(cached, _)| *cached == key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.slot = None;
            debug!(subject, rows = rows.len(), "Layout cache miss");
        }

        let (_, layout) = self
            .slot
            .get_or_insert_with(|| (key, compute_layout(subject, rows, selected_disease)));
        layout
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
