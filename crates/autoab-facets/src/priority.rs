//! Priority table driving the cascade.
//!
//! Each facet declares which other facets a selection resets (`clears`) and
//! which facets need fresh option sets afterwards (`recomputes`). The table is
//! closed: every `Facet` has exactly one rule, in priority order.

use crate::facet::Facet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetRule {
    pub facet: Facet,
    /// Reset when this facet receives a value.
    pub clears: &'static [Facet],
    /// Option sets refetched after this facet changes.
    pub recomputes: &'static [Facet],
}

use crate::facet::Facet::{Autoantibody, Autoantigen, Disease, Epitope, Type, UniprotId};

/// One rule per facet, highest priority first.
pub const PRIORITY_TABLE: [FacetRule; 6] = [
    FacetRule {
        facet:      Disease,
        clears:     &[Autoantibody, Autoantigen, Epitope, Type, UniprotId],
        recomputes: &[Autoantibody, Autoantigen, Epitope, Type, UniprotId],
    },
    FacetRule {
        facet:      Autoantibody,
        clears:     &[Disease, Autoantigen, Epitope, Type, UniprotId],
        recomputes: &[Disease, Autoantigen, Epitope, Type, UniprotId],
    },
    // Autoantigen also restricts disease and autoantibody (reverse filtering).
    FacetRule {
        facet:      Autoantigen,
        clears:     &[Disease, Autoantibody, Epitope, Type, UniprotId],
        recomputes: &[Disease, Autoantibody, Epitope, Type, UniprotId],
    },
    // Refinements compose with the active primary facet instead of resetting it.
    FacetRule {
        facet:      Epitope,
        clears:     &[],
        recomputes: &[Type, UniprotId],
    },
    FacetRule {
        facet:      Type,
        clears:     &[],
        recomputes: &[UniprotId],
    },
    FacetRule {
        facet:      UniprotId,
        clears:     &[],
        recomputes: &[],
    },
];

/// Primary facets tried, in order, as the narrowing filter for an option fetch.
/// Autoantibody is the narrower filter, so it wins over disease.
pub const NARROWS_BY: [Facet; 3] = [Autoantibody, Disease, Autoantigen];

pub fn rule_for(facet: Facet) -> &'static FacetRule {
    &PRIORITY_TABLE[facet.rank()]
}
