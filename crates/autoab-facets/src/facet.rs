//! Facet names, the user's current selection and filter maps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use autoab_common::{AutoabError, Entry};
use serde::{Deserialize, Serialize};

/// One filter dimension of the entry table, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Disease,
    Autoantibody,
    Autoantigen,
    Epitope,
    Type,
    UniprotId,
}

impl Facet {
    /// All facets, highest priority first.
    pub const ALL: [Facet; 6] = [
        Facet::Disease,
        Facet::Autoantibody,
        Facet::Autoantigen,
        Facet::Epitope,
        Facet::Type,
        Facet::UniprotId,
    ];

    /// Position in the priority order; 0 is the highest.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Field name used by the REST API.
    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Disease      => "disease",
            Facet::Autoantibody => "autoantibody",
            Facet::Autoantigen  => "autoantigen",
            Facet::Epitope      => "epitope",
            Facet::Type         => "type",
            Facet::UniprotId    => "uniprotId",
        }
    }

    /// Disease, autoantibody and autoantigen are mutually exclusive.
    pub fn is_primary(self) -> bool {
        matches!(self, Facet::Disease | Facet::Autoantibody | Facet::Autoantigen)
    }

    /// The entry's value for this facet.
    pub fn value_of(self, entry: &Entry) -> &str {
        match self {
            Facet::Disease      => &entry.disease,
            Facet::Autoantibody => &entry.autoantibody,
            Facet::Autoantigen  => &entry.autoantigen,
            Facet::Epitope      => &entry.epitope,
            Facet::Type         => &entry.kind,
            Facet::UniprotId    => &entry.uniprot_id,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = AutoabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.as_str() == s)
            .ok_or_else(|| AutoabError::InvalidFacet(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Selected value per facet plus the free-text search. Empty means unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacetSelection {
    pub disease: String,
    pub autoantibody: String,
    pub autoantigen: String,
    pub epitope: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uniprot_id: String,
    pub search: String,
}

impl FacetSelection {
    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Disease      => &self.disease,
            Facet::Autoantibody => &self.autoantibody,
            Facet::Autoantigen  => &self.autoantigen,
            Facet::Epitope      => &self.epitope,
            Facet::Type         => &self.kind,
            Facet::UniprotId    => &self.uniprot_id,
        }
    }

    pub fn set(&mut self, facet: Facet, value: impl Into<String>) {
        let slot = match facet {
            Facet::Disease      => &mut self.disease,
            Facet::Autoantibody => &mut self.autoantibody,
            Facet::Autoantigen  => &mut self.autoantigen,
            Facet::Epitope      => &mut self.epitope,
            Facet::Type         => &mut self.kind,
            Facet::UniprotId    => &mut self.uniprot_id,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self, facet: Facet) {
        self.set(facet, String::new());
    }

    pub fn is_selected(&self, facet: Facet) -> bool {
        !self.get(facet).is_empty()
    }

    /// Highest-priority primary facet with a value, if any.
    pub fn active_primary(&self) -> Option<Facet> {
        Facet::ALL
            .into_iter()
            .filter(|f| f.is_primary())
            .find(|f| self.is_selected(*f))
    }

    /// Every selected facet as a filter map (search excluded).
    pub fn filters(&self) -> FacetFilters {
        let mut filters = FacetFilters::default();
        for facet in Facet::ALL {
            if self.is_selected(facet) {
                filters.insert(facet, self.get(facet));
            }
        }
        filters
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Facet → value constraints, matched by exact string equality after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetFilters(BTreeMap<Facet, String>);

impl FacetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-constraint filter map.
    pub fn single(facet: Facet, value: impl Into<String>) -> Self {
        let mut filters = Self::new();
        filters.insert(facet, value);
        filters
    }

    /// Blank values are ignored; a blank filter constrains nothing.
    pub fn insert(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.0.insert(facet, trimmed.to_string());
        }
    }

    pub fn get(&self, facet: Facet) -> Option<&str> {
        self.0.get(&facet).map(String::as_str)
    }

    pub fn contains(&self, facet: Facet) -> bool {
        self.0.contains_key(&facet)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Does the entry satisfy every constraint?
    pub fn matches(&self, entry: &Entry) -> bool {
        self.iter().all(|(facet, value)| facet.value_of(entry).trim() == value)
    }

    /// Query-string pairs using the API field names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.iter().map(|(f, v)| (f.as_str(), v.to_string())).collect()
    }
}
