//! Debounced autoantibody suggestions for the search box.
//!
//! Every call supersedes the previous one. A call waits out the debounce
//! window and gives up if a newer call arrived meanwhile; a backend reply
//! that lands after a newer call is dropped the same way.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use autoab_config::SearchConfig;
use autoab_facets::synonyms::prioritize_ro52_synonyms;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::PortalApi;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Suggestions {
    /// A newer query replaced this one.
    Superseded,
    /// Query shorter than the configured minimum; nothing was fetched.
    TooShort,
    Ready(Vec<String>),
    Unavailable(String),
}

pub struct SearchSuggester {
    portal: Arc<dyn PortalApi>,
    debounce: Duration,
    min_query_len: usize,
    ro52_priority: bool,
    generation: AtomicU64,
}

impl SearchSuggester {
    pub fn new(portal: Arc<dyn PortalApi>, cfg: &SearchConfig) -> Self {
        Self {
            portal,
            debounce: cfg.debounce(),
            min_query_len: cfg.min_query_len,
            ro52_priority: cfg.legacy_ro52_priority,
            generation: AtomicU64::new(0),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub async fn suggest(&self, query: &str) -> Suggestions {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            return Suggestions::TooShort;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            debug!(query, "Suggestion superseded during debounce");
            return Suggestions::Superseded;
        }

        let outcome = self.portal.search_biomarkers(query).await;
        if !self.is_current(generation) {
            debug!(query, "Dropping late suggestion reply");
            return Suggestions::Superseded;
        }

        match outcome {
            Ok(rows) => {
                let mut seen = HashSet::new();
                let names: Vec<String> = rows
                    .into_iter()
                    .map(|row| row.name.trim().to_string())
                    .filter(|name| !name.is_empty() && seen.insert(name.clone()))
                    .collect();
                let names = if self.ro52_priority { prioritize_ro52_synonyms(names) } else { names };
                debug!(query, count = names.len(), "Suggestions ready");
                Suggestions::Ready(names)
            }
            Err(e) => {
                warn!(query, error = %e, "Suggestion search failed");
                Suggestions::Unavailable(e.to_string())
            }
        }
    }
}
