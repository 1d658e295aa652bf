//! Portal doubles shared by the client integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use autoab_client::{EntryQuery, InMemoryPortal, PortalApi};
use autoab_common::{AutoabError, BiomarkerAssociation, Entry, EntryPage, Result};
use autoab_facets::{Facet, FacetFilters};

/// In-memory portal with per-value latency and per-facet failures.
#[derive(Default)]
pub struct ScriptedPortal {
    inner: InMemoryPortal,
    /// Delay applied when any filter value (or the search query) matches the key.
    delays: HashMap<String, Duration>,
    failing: HashSet<Facet>,
    pub option_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl ScriptedPortal {
    pub fn new(entries: Vec<Entry>, associations: Vec<BiomarkerAssociation>) -> Self {
        Self { inner: InMemoryPortal::new(entries, associations), ..Default::default() }
    }

    pub fn with_delay(mut self, value: &str, delay: Duration) -> Self {
        self.delays.insert(value.to_string(), delay);
        self
    }

    pub fn failing(mut self, facet: Facet) -> Self {
        self.failing.insert(facet);
        self
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    async fn pause_for<'a>(&self, values: impl Iterator<Item = &'a str>) {
        let delay = values.filter_map(|v| self.delays.get(v)).max().copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PortalApi for ScriptedPortal {
    async fn fetch_unique_values(&self, facet: Facet, filters: &FacetFilters) -> Result<Vec<String>> {
        self.option_calls.fetch_add(1, Ordering::SeqCst);
        self.pause_for(filters.iter().map(|(_, v)| v)).await;
        if self.failing.contains(&facet) {
            return Err(AutoabError::Backend { status: 503, message: format!("{facet} offline") });
        }
        self.inner.fetch_unique_values(facet, filters).await
    }

    async fn fetch_entries(&self, query: &EntryQuery) -> Result<EntryPage> {
        self.pause_for(query.filters.iter().map(|(_, v)| v)).await;
        self.inner.fetch_entries(query).await
    }

    async fn search_biomarkers(&self, query: &str) -> Result<Vec<BiomarkerAssociation>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.pause_for(std::iter::once(query)).await;
        self.inner.search_biomarkers(query).await
    }
}
