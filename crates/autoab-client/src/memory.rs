//! Portal over a flat, in-process record set.
//!
//! Option sets are computed locally from the entries, so this behaves like a
//! backend with no unique-value endpoint of its own.

use std::cmp::Ordering;

use async_trait::async_trait;
use autoab_common::{BiomarkerAssociation, Entry, EntryPage, Pagination, Result};
use autoab_facets::options::{filter_entries, unique_values};
use autoab_facets::{Facet, FacetFilters};
use tracing::debug;

use crate::api::{EntryQuery, PortalApi, SortOrder};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPortal {
    entries: Vec<Entry>,
    associations: Vec<BiomarkerAssociation>,
}

impl InMemoryPortal {
    pub fn new(entries: Vec<Entry>, associations: Vec<BiomarkerAssociation>) -> Self {
        Self { entries, associations }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn matches_search(entry: &Entry, needle: &str) -> bool {
        Facet::ALL
            .into_iter()
            .any(|f| f.value_of(entry).to_lowercase().contains(needle))
    }

    fn matches_association(row: &BiomarkerAssociation, needle: &str) -> bool {
        if row.name.to_lowercase().contains(needle) {
            return true;
        }
        row.raw
            .values()
            .filter_map(|v| v.as_str())
            .any(|v| v.to_lowercase().contains(needle))
    }
}

#[async_trait]
impl PortalApi for InMemoryPortal {
    async fn fetch_unique_values(&self, facet: Facet, filters: &FacetFilters) -> Result<Vec<String>> {
        Ok(unique_values(&self.entries, facet, filters))
    }

    async fn fetch_entries(&self, query: &EntryQuery) -> Result<EntryPage> {
        let mut rows = filter_entries(&self.entries, &query.filters);

        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            rows.retain(|e| Self::matches_search(e, &needle));
        }

        // Unknown sort fields leave the stored order untouched.
        if let Some(facet) = query.sort_by.as_deref().and_then(|s| s.parse::<Facet>().ok()) {
            let descending = query.sort_order == Some(SortOrder::Desc);
            rows.sort_by(|a, b| {
                let ord: Ordering = facet.value_of(a).cmp(facet.value_of(b));
                if descending { ord.reverse() } else { ord }
            });
        }

        let total = rows.len() as u64;
        let page = query.page.max(1);
        let skip = (page - 1).saturating_mul(query.limit) as usize;
        let data: Vec<Entry> = rows
            .into_iter()
            .skip(skip)
            .take(query.limit as usize)
            .cloned()
            .collect();

        debug!(total, page, returned = data.len(), "Served entries from memory");
        Ok(EntryPage {
            data,
            pagination: Pagination::for_total(page, query.limit, total),
        })
    }

    async fn search_biomarkers(&self, query: &str) -> Result<Vec<BiomarkerAssociation>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .associations
            .iter()
            .filter(|row| Self::matches_association(row, &needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoab_test_utils::{ro52_associations, sample_entries};
    use pretty_assertions::assert_eq;

    fn portal() -> InMemoryPortal {
        InMemoryPortal::new(sample_entries(), ro52_associations())
    }

    fn query(filters: FacetFilters, page: u64, limit: u64) -> EntryQuery {
        EntryQuery { filters, search: None, page, limit, sort_by: None, sort_order: None }
    }

    #[tokio::test]
    async fn test_unique_values_respect_filters() {
        let values = portal()
            .fetch_unique_values(Facet::Disease, &FacetFilters::single(Facet::Autoantibody, "Anti-Ro52"))
            .await
            .unwrap();
        assert_eq!(values, vec!["Myositis", "SLE", "Sjogren syndrome"]);
    }

    #[tokio::test]
    async fn test_pagination_counts_all_matches() {
        let page = portal().fetch_entries(&query(FacetFilters::new(), 2, 3)).await.unwrap();
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.data[0].id, "e4");
        assert_eq!(page.pagination, Pagination { page: 2, limit: 3, total: 8, pages: 3 });
    }

    #[tokio::test]
    async fn test_search_and_sort() {
        let q = query(FacetFilters::new(), 1, 10)
            .with_search("trim21")
            .sorted_by("disease", SortOrder::Desc);
        let page = portal().fetch_entries(&q).await.unwrap();
        let diseases: Vec<&str> = page.data.iter().map(|e| e.disease.as_str()).collect();
        assert_eq!(diseases, vec!["Sjogren syndrome", "SLE", "Myositis"]);
    }

    #[tokio::test]
    async fn test_biomarker_search_matches_name_and_raw_columns() {
        let p = portal();
        assert_eq!(p.search_biomarkers("dry eyes").await.unwrap().len(), 1);
        assert!(p.search_biomarkers("  ").await.unwrap().is_empty());
    }
}
