//! reqwest-backed portal client.
//!
//! Endpoints used, relative to the configured base URL:
//!   GET entries/unique/{field}   distinct facet values, filters as query params
//!   GET entries                  paginated entries
//!   GET biomarkers/search?q=     raw association rows

use std::time::Duration;

use async_trait::async_trait;
use autoab_common::{AutoabError, BiomarkerAssociation, EntryPage, Result};
use autoab_config::BackendConfig;
use autoab_facets::{Facet, FacetFilters};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::api::{EntryQuery, PortalApi};

/// List endpoints answer either with a bare array or `{"data": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items)      => items,
            ListBody::Wrapped { data } => data,
        }
    }
}

pub struct HttpPortalClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPortalClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AutoabError::Config(format!("Invalid backend URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AutoabError::Config(format!("Backend URL cannot be a base: {base_url}")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("autoab/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self> {
        Self::new(&cfg.base_url, cfg.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, params: &[(&str, String)]) -> Result<T> {
        let resp = self.client.get(url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AutoabError::Backend { status: status.as_u16(), message });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PortalApi for HttpPortalClient {
    #[instrument(skip(self, filters), fields(filters = filters.len()))]
    async fn fetch_unique_values(&self, facet: Facet, filters: &FacetFilters) -> Result<Vec<String>> {
        let url = self.endpoint(&["entries", "unique", facet.as_str()]);
        let body: ListBody<String> = self.get_json(url, &filters.to_query_pairs()).await?;
        let values = body.into_vec();
        debug!(count = values.len(), "Fetched facet values");
        Ok(values)
    }

    #[instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    async fn fetch_entries(&self, query: &EntryQuery) -> Result<EntryPage> {
        let url = self.endpoint(&["entries"]);
        let page: EntryPage = self.get_json(url, &query.to_query_pairs()).await?;
        debug!(rows = page.data.len(), total = page.pagination.total, "Fetched entries");
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn search_biomarkers(&self, query: &str) -> Result<Vec<BiomarkerAssociation>> {
        let url = self.endpoint(&["biomarkers", "search"]);
        let body: ListBody<BiomarkerAssociation> =
            self.get_json(url, &[("q", query.to_string())]).await?;
        let rows = body.into_vec();
        debug!(rows = rows.len(), "Fetched biomarker associations");
        Ok(rows)
    }
}
