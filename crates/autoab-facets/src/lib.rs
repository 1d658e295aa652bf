//! autoab-facets — Dependent-filter cascade over the six entry facets.
//!
//! Selecting a facet value yields the next selection, the option-set fetches
//! needed for the other facets and the entry fetch for the result table.
//! Everything here is pure; fetching is done by the caller.

pub mod facet;
pub mod priority;
pub mod cascade;
pub mod options;
pub mod synonyms;

pub use cascade::{
    apply_facet_change, apply_named_facet_change, page_size_for, FacetChange, OptionFetch, PageSize,
    ResultFetch,
};
pub use facet::{Facet, FacetFilters, FacetSelection};
pub use options::{FacetOptionSet, FacetOptions};
