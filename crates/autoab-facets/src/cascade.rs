//! The cascade step: one facet change in, next selection and fetch plan out.

use autoab_common::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::facet::{Facet, FacetFilters, FacetSelection};
use crate::priority::{rule_for, NARROWS_BY};

/// Option-set request for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionFetch {
    pub facet: Facet,
    pub filters: FacetFilters,
}

impl OptionFetch {
    /// Unfiltered fetch of every distinct value.
    pub fn is_global(&self) -> bool {
        self.filters.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// Standard pagination.
    Default,
    /// Every matching entry on one page.
    Unbounded,
}

/// Entry request for the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFetch {
    pub filters: FacetFilters,
    pub page: u64,
    pub page_size: PageSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetChange {
    pub selection: FacetSelection,
    pub option_fetches: Vec<OptionFetch>,
    pub result_fetch: ResultFetch,
}

impl FacetChange {
    /// Facets whose option sets this change refetches.
    pub fn refetched_facets(&self) -> Vec<Facet> {
        self.option_fetches.iter().map(|f| f.facet).collect()
    }
}

/// Apply a user's facet change to `current`.
///
/// A non-empty value resets the facet's `clears` set and refetches its
/// `recomputes` set. An empty value resets only the facet itself and
/// refetches the facet plus its `recomputes` set from what remains selected.
/// The free-text search is always cleared.
pub fn apply_facet_change(facet: Facet, value: &str, current: &FacetSelection) -> FacetChange {
    let value = value.trim();
    let rule = rule_for(facet);

    let mut selection = current.clone();
    selection.search.clear();
    selection.set(facet, value);

    let targets: Vec<Facet> = if value.is_empty() {
        std::iter::once(facet).chain(rule.recomputes.iter().copied()).collect()
    } else {
        for cleared in rule.clears {
            selection.clear(*cleared);
        }
        rule.recomputes.to_vec()
    };

    let option_fetches = targets
        .into_iter()
        .map(|target| OptionFetch {
            facet: target,
            filters: narrowing_filters(target, &selection),
        })
        .collect::<Vec<_>>();

    let page_size = page_size_for(&selection);

    debug!(
        %facet,
        value,
        fetches = option_fetches.len(),
        ?page_size,
        "Applied facet change"
    );

    FacetChange {
        result_fetch: ResultFetch {
            filters: selection.filters(),
            page: 1,
            page_size,
        },
        selection,
        option_fetches,
    }
}

/// Result page size for a selection: every row once a primary facet is
/// active, standard pagination otherwise.
pub fn page_size_for(selection: &FacetSelection) -> PageSize {
    if selection.active_primary().is_some() {
        PageSize::Unbounded
    } else {
        PageSize::Default
    }
}

/// Same as [`apply_facet_change`] for a facet given by its API name.
/// Unknown names are rejected with `AutoabError::InvalidFacet`.
pub fn apply_named_facet_change(
    name: &str,
    value: &str,
    current: &FacetSelection,
) -> Result<FacetChange> {
    let facet: Facet = name.parse()?;
    Ok(apply_facet_change(facet, value, current))
}

/// Minimum sufficient filter set for refetching `target`'s options: the first
/// selected primary in narrows-by order, plus any selected refinement facet
/// ranked above the target.
pub fn narrowing_filters(target: Facet, selection: &FacetSelection) -> FacetFilters {
    let mut filters = FacetFilters::new();

    if let Some(primary) = NARROWS_BY
        .into_iter()
        .filter(|f| *f != target)
        .find(|f| selection.is_selected(*f))
    {
        filters.insert(primary, selection.get(primary));
    }

    for refinement in Facet::ALL
        .into_iter()
        .filter(|f| !f.is_primary() && f.rank() < target.rank())
    {
        if selection.is_selected(refinement) {
            filters.insert(refinement, selection.get(refinement));
        }
    }

    filters
}
