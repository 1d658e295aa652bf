//! Facet controller: owns the selection and applies fetched option sets.
//!
//! Each change bumps a generation counter for every facet it refetches and
//! for the result table. A response is applied only while its generation is
//! still current, so a slow reply to an older change never overwrites a
//! newer one. Failed fetches become `FacetOptions::Unavailable` and are never
//! propagated to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use autoab_common::{AutoabError, EntryPage, Result};
use autoab_facets::{
    apply_facet_change, page_size_for, Facet, FacetChange, FacetFilters, FacetOptionSet,
    FacetOptions, FacetSelection, PageSize, ResultFetch,
};
use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{EntryQuery, PageLimits, PortalApi};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ResultState {
    #[default]
    Idle,
    Loading,
    Ready(EntryPage),
    Unavailable(String),
}

impl ResultState {
    pub fn page(&self) -> Option<&EntryPage> {
        match self {
            ResultState::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// Point-in-time copy of the controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub selection: FacetSelection,
    pub options: FacetOptionSet,
    pub results: ResultState,
}

#[derive(Debug, Default)]
struct ControllerState {
    selection: FacetSelection,
    options: FacetOptionSet,
    results: ResultState,
    option_generations: HashMap<Facet, u64>,
    result_generation: u64,
}

impl ControllerState {
    fn next_option_generation(&mut self, facet: Facet) -> u64 {
        let generation = self.option_generations.entry(facet).or_insert(0);
        *generation += 1;
        *generation
    }

    fn is_current(&self, facet: Facet, generation: u64) -> bool {
        self.option_generations.get(&facet).copied().unwrap_or(0) == generation
    }
}

/// Option fetch tagged with the generation it was issued under.
struct Ticket {
    facet: Facet,
    filters: FacetFilters,
    generation: u64,
}

pub struct FacetController {
    portal: Arc<dyn PortalApi>,
    limits: PageLimits,
    state: Mutex<ControllerState>,
}

impl FacetController {
    pub fn new(portal: Arc<dyn PortalApi>, limits: PageLimits) -> Self {
        Self { portal, limits, state: Mutex::new(ControllerState::default()) }
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock().await;
        ControllerSnapshot {
            selection: state.selection.clone(),
            options: state.options.clone(),
            results: state.results.clone(),
        }
    }

    /// Load every facet's global option set and the first default page.
    pub async fn initialize(&self) {
        let fetch = ResultFetch { filters: FacetFilters::new(), page: 1, page_size: PageSize::Default };
        let (tickets, result_generation) = {
            let mut state = self.state.lock().await;
            let tickets = Facet::ALL
                .into_iter()
                .map(|facet| self.issue(&mut state, facet, FacetFilters::new()))
                .collect::<Vec<_>>();
            (tickets, self.issue_results(&mut state))
        };
        info!(facets = tickets.len(), "Loading initial option sets");
        self.run(tickets, EntryQuery::from_result_fetch(&fetch, &self.limits), result_generation)
            .await;
    }

    /// Apply one user change and wait for its fetches to settle.
    pub async fn change(&self, facet: Facet, value: &str) -> FacetChange {
        let change_id = Uuid::new_v4();
        let (change, tickets, result_generation) = {
            let mut state = self.state.lock().await;
            let change = apply_facet_change(facet, value, &state.selection);
            state.selection = change.selection.clone();
            let tickets = change
                .option_fetches
                .iter()
                .map(|fetch| self.issue(&mut state, fetch.facet, fetch.filters.clone()))
                .collect::<Vec<_>>();
            let result_generation = self.issue_results(&mut state);
            (change, tickets, result_generation)
        };

        debug!(%change_id, %facet, value, refetch = ?change.refetched_facets(), "Dispatching facet change");
        let query = EntryQuery::from_result_fetch(&change.result_fetch, &self.limits);
        self.run(tickets, query, result_generation).await;
        change
    }

    /// Same as [`change`](Self::change) for a facet given by its API name.
    pub async fn change_named(&self, name: &str, value: &str) -> Result<FacetChange> {
        let facet: Facet = name.parse()?;
        Ok(self.change(facet, value).await)
    }

    /// Free-text search over the current facet filters. Option sets are kept,
    /// and the page size follows the selection as it does for facet changes.
    pub async fn search(&self, text: &str) -> ResultState {
        let (query, result_generation) = {
            let mut state = self.state.lock().await;
            state.selection.search = text.trim().to_string();
            let fetch = ResultFetch {
                filters: state.selection.filters(),
                page: 1,
                page_size: page_size_for(&state.selection),
            };
            let query = EntryQuery::from_result_fetch(&fetch, &self.limits).with_search(text);
            (query, self.issue_results(&mut state))
        };
        self.run(Vec::new(), query, result_generation).await;
        self.state.lock().await.results.clone()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn issue(&self, state: &mut ControllerState, facet: Facet, filters: FacetFilters) -> Ticket {
        let generation = state.next_option_generation(facet);
        state.options.set(facet, FacetOptions::Loading);
        Ticket { facet, filters, generation }
    }

    fn issue_results(&self, state: &mut ControllerState) -> u64 {
        state.result_generation += 1;
        state.results = ResultState::Loading;
        state.result_generation
    }

    async fn run(&self, tickets: Vec<Ticket>, query: EntryQuery, result_generation: u64) {
        let option_fetches = join_all(tickets.into_iter().map(|ticket| async move {
            let outcome = self.portal.fetch_unique_values(ticket.facet, &ticket.filters).await;
            (ticket, outcome)
        }));
        let result_fetch = self.portal.fetch_entries(&query);
        let (option_outcomes, result_outcome) = tokio::join!(option_fetches, result_fetch);

        let mut state = self.state.lock().await;
        for (ticket, outcome) in option_outcomes {
            apply_options(&mut state, ticket, outcome);
        }
        if state.result_generation == result_generation {
            state.results = match result_outcome {
                Ok(page) => ResultState::Ready(page),
                Err(e) => {
                    warn!(error = %e, "Entry fetch failed");
                    ResultState::Unavailable(e.to_string())
                }
            };
        } else {
            debug!(result_generation, "Discarding stale result page");
        }
    }
}

fn apply_options(state: &mut ControllerState, ticket: Ticket, outcome: Result<Vec<String>>) {
    if !state.is_current(ticket.facet, ticket.generation) {
        debug!(facet = %ticket.facet, generation = ticket.generation, "Discarding stale option set");
        return;
    }
    let options = match outcome {
        Ok(values) => FacetOptions::Ready(values),
        Err(e) => {
            warn!(facet = %ticket.facet, error = %e, "Option fetch failed");
            FacetOptions::Unavailable(describe(&e))
        }
    };
    state.options.set(ticket.facet, options);
}

fn describe(err: &AutoabError) -> String {
    match err {
        AutoabError::Backend { status, .. } => format!("backend returned {status}"),
        other => other.to_string(),
    }
}
