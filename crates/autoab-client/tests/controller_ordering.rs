//! Controller behaviour under overlapping and failing fetches.

mod common;

use std::sync::Arc;
use std::time::Duration;

use autoab_client::{FacetController, PageLimits};
use autoab_facets::{Facet, FacetOptions};
use autoab_test_utils::pretty_assertions::assert_eq;
use autoab_test_utils::sample_entries;
use common::ScriptedPortal;

#[tokio::test]
async fn slow_reply_to_older_change_never_overwrites_newer_one() {
    let portal = ScriptedPortal::new(sample_entries(), Vec::new())
        .with_delay("Anti-Ro52", Duration::from_millis(200));
    let controller = FacetController::new(Arc::new(portal), PageLimits::default());

    let (slow, fast) = tokio::join!(controller.change(Facet::Autoantibody, "Anti-Ro52"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.change(Facet::Autoantibody, "Anti-La").await
    });
    assert_eq!(slow.selection.autoantibody, "Anti-Ro52");
    assert_eq!(fast.selection.autoantibody, "Anti-La");

    let snap = controller.snapshot().await;
    assert_eq!(snap.selection.autoantibody, "Anti-La");
    assert_eq!(snap.options.get(Facet::Disease).values().unwrap(), ["Sjogren syndrome"]);
    assert_eq!(snap.options.get(Facet::Autoantigen).values().unwrap(), ["SSB"]);

    let page = snap.results.page().unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "e4");
}

#[tokio::test]
async fn failed_fetch_is_unavailable_not_empty() {
    let portal = ScriptedPortal::new(sample_entries(), Vec::new()).failing(Facet::Epitope);
    let controller = FacetController::new(Arc::new(portal), PageLimits::default());

    controller.change(Facet::Autoantibody, "Anti-La").await;
    let snap = controller.snapshot().await;
    assert!(snap.options.get(Facet::Epitope).is_unavailable());
    assert_eq!(snap.options.get(Facet::Type).values().unwrap(), ["IgM"]);

    // A successful fetch with no values is an empty Ready set.
    let portal = ScriptedPortal::new(sample_entries(), Vec::new());
    let controller = FacetController::new(Arc::new(portal), PageLimits::default());
    controller.change(Facet::Autoantibody, "Anti-dsDNA").await;
    let snap = controller.snapshot().await;
    assert_eq!(snap.options.get(Facet::Epitope), &FacetOptions::Ready(Vec::new()));
}

#[tokio::test]
async fn clearing_a_facet_refetches_it_and_its_dependents() {
    let portal = Arc::new(ScriptedPortal::new(sample_entries(), Vec::new()));
    let controller = FacetController::new(portal.clone(), PageLimits::default());

    controller.change(Facet::Autoantibody, "Anti-Ro52").await;
    controller.change(Facet::Epitope, "RING").await;
    let change = controller.change(Facet::Epitope, "").await;

    assert_eq!(change.refetched_facets(), vec![Facet::Epitope, Facet::Type, Facet::UniprotId]);
    let snap = controller.snapshot().await;
    assert_eq!(snap.selection.autoantibody, "Anti-Ro52");
    assert_eq!(snap.options.get(Facet::Epitope).values().unwrap(), ["RING", "coiled-coil"]);
    assert_eq!(snap.options.get(Facet::Type).values().unwrap(), ["IgA", "IgG"]);
}
