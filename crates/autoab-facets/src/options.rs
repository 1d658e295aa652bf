//! Facet option sets and their computation over a flat entry list.

use std::collections::{BTreeMap, BTreeSet};

use autoab_common::Entry;
use serde::{Deserialize, Serialize};

use crate::facet::{Facet, FacetFilters};

/// State of one facet's dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FacetOptions {
    #[default]
    Loading,
    Ready(Vec<String>),
    /// The fetch failed. Distinct from `Ready(vec![])`, which means no options exist.
    Unavailable(String),
}

impl FacetOptions {
    pub fn values(&self) -> Option<&[String]> {
        match self {
            FacetOptions::Ready(values) => Some(values),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FacetOptions::Unavailable(_))
    }
}

/// Option state for every facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetOptionSet(BTreeMap<Facet, FacetOptions>);

impl Default for FacetOptionSet {
    fn default() -> Self {
        Self(Facet::ALL.into_iter().map(|f| (f, FacetOptions::Loading)).collect())
    }
}

impl FacetOptionSet {
    pub fn get(&self, facet: Facet) -> &FacetOptions {
        // Every facet is seeded in `default`, so the lookup cannot miss.
        static LOADING: FacetOptions = FacetOptions::Loading;
        self.0.get(&facet).unwrap_or(&LOADING)
    }

    pub fn set(&mut self, facet: Facet, options: FacetOptions) {
        self.0.insert(facet, options);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &FacetOptions)> {
        self.0.iter().map(|(f, o)| (*f, o))
    }
}

/// Entries satisfying every filter.
pub fn filter_entries<'a>(entries: &'a [Entry], filters: &FacetFilters) -> Vec<&'a Entry> {
    entries.iter().filter(|e| filters.matches(e)).collect()
}

/// Sorted distinct non-blank values of `facet` among entries matching `filters`.
/// An empty filter map yields the global unique-value set.
pub fn unique_values(entries: &[Entry], facet: Facet, filters: &FacetFilters) -> Vec<String> {
    entries
        .iter()
        .filter(|e| filters.matches(e))
        .map(|e| facet.value_of(e).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
