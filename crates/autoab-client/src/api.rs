//! Portal backend boundary.

use async_trait::async_trait;
use autoab_common::{BiomarkerAssociation, EntryPage, Result};
use autoab_config::FacetsConfig;
use autoab_facets::{Facet, FacetFilters, PageSize, ResultFetch};
use serde::{Deserialize, Serialize};

/// Common interface for the portal's read endpoints.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Distinct values of `facet` among entries matching `filters`.
    async fn fetch_unique_values(&self, facet: Facet, filters: &FacetFilters) -> Result<Vec<String>>;

    /// One page of entries.
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<EntryPage>;

    /// Raw biomarker association rows matching a free-text query.
    async fn search_biomarkers(&self, query: &str) -> Result<Vec<BiomarkerAssociation>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc  => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Concrete row counts behind `PageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u64,
    pub unbounded_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::from(&FacetsConfig::default())
    }
}

impl From<&FacetsConfig> for PageLimits {
    fn from(cfg: &FacetsConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            unbounded_limit: cfg.unbounded_page_limit,
        }
    }
}

impl PageLimits {
    pub fn limit_for(&self, size: PageSize) -> u64 {
        match size {
            PageSize::Default   => self.default_page_size,
            PageSize::Unbounded => self.unbounded_limit,
        }
    }
}

/// Parameters for `GET /entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub filters: FacetFilters,
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl EntryQuery {
    pub fn from_result_fetch(fetch: &ResultFetch, limits: &PageLimits) -> Self {
        Self {
            filters: fetch.filters.clone(),
            search: None,
            page: fetch.page.max(1),
            limit: limits.limit_for(fetch.page_size),
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Query-string pairs in the backend's parameter names. Facet filters go
    /// out as one `{field}={value}` pair each.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            params.push(("sortOrder", order.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.extend(self.filters.to_query_pairs());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_size_maps_to_configured_limits() {
        let limits = PageLimits { default_page_size: 10, unbounded_limit: 100_000 };
        let fetch = ResultFetch {
            filters: FacetFilters::single(Facet::Autoantibody, "Anti-Ro52"),
            page: 1,
            page_size: PageSize::Unbounded,
        };
        let query = EntryQuery::from_result_fetch(&fetch, &limits);
        assert_eq!(query.limit, 100_000);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_query_pairs_use_backend_names() {
        let query = EntryQuery {
            filters: FacetFilters::single(Facet::Disease, "SLE"),
            search: None,
            page: 2,
            limit: 10,
            sort_by: None,
            sort_order: None,
        }
        .sorted_by("disease", SortOrder::Desc);

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("sortBy", "disease".to_string()),
                ("sortOrder", "desc".to_string()),
                ("disease", "SLE".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let fetch = ResultFetch { filters: FacetFilters::new(), page: 0, page_size: PageSize::Default };
        let query = EntryQuery::from_result_fetch(&fetch, &PageLimits::default()).with_search("   ");
        assert_eq!(query.search, None);
        assert_eq!(query.page, 1);
        assert!(query.to_query_pairs().iter().all(|(k, _)| *k != "search"));
    }
}
