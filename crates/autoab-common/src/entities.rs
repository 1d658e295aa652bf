/// Core record types exchanged with the portal backend.
/// These mirror the JSON documents served by the REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Entry (disease-association record)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub disease: String,
    #[serde(default)]
    pub autoantibody: String,
    #[serde(default)]
    pub autoantigen: String,
    #[serde(default)]
    pub epitope: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uniprot_id: String,
    /// Clinical attributes (sensitivity, diagnosticMarker, ...) the core never inspects.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    /// Pagination block for `total` rows served `limit` per page.
    pub fn for_total(page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self { page, limit, total, pages }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPage {
    #[serde(default)]
    pub data: Vec<Entry>,
    #[serde(default)]
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Biomarker association (one raw search row)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerAssociation {
    /// Subject entity, usually the antibody name.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifestation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevalence: Option<Value>,
    /// Source spreadsheet row as imported, keyed by original column header.
    #[serde(default)]
    pub raw: Map<String, Value>,
}

impl BiomarkerAssociation {
    /// Raw column value, `None` when absent or JSON null.
    pub fn raw_value(&self, key: &str) -> Option<&Value> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    /// Raw column as a trimmed, non-empty string.
    pub fn raw_str(&self, key: &str) -> Option<&str> {
        self.raw_value(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
