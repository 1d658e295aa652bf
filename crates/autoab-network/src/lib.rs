//! autoab-network — Radial biomarker network layout.
//!
//! Turns the flat association rows for one subject (usually an antibody) into
//! a two-ring layout: diseases around the subject, and the manifestations of
//! a focused disease fanned out around that disease.

pub mod percent;
pub mod grouping;
pub mod palette;
pub mod layout;
pub mod view;
pub mod cache;

pub use cache::LayoutCache;
pub use grouping::{group_associations, DiseaseGroup, Manifestation};
pub use layout::{compute_layout, DiseaseNode, ManifestationNode, NetworkLayout};
pub use percent::parse_percent;
pub use view::{BackOutcome, NetworkView, ViewState};
