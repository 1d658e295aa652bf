//! autoab-client — Caller-side plumbing around the pure engines.
//!
//! Provides the portal backend boundary (`PortalApi`) with HTTP and in-memory
//! implementations, the facet controller that owns selection state and
//! discards stale option fetches, debounced search suggestions, and the
//! report cache.

pub mod api;
pub mod http;
pub mod memory;
pub mod controller;
pub mod suggest;
pub mod report_cache;

pub use api::{EntryQuery, PageLimits, PortalApi, SortOrder};
pub use controller::{ControllerSnapshot, FacetController, ResultState};
pub use http::HttpPortalClient;
pub use memory::InMemoryPortal;
pub use report_cache::{report_key, ReportStore, TtlReportCache};
pub use suggest::{SearchSuggester, Suggestions};
