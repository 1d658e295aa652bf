//! Debounce and supersession of search suggestions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use autoab_client::{SearchSuggester, Suggestions};
use autoab_config::SearchConfig;
use autoab_test_utils::pretty_assertions::assert_eq;
use autoab_test_utils::{association, ro52_associations};
use common::ScriptedPortal;
use serde_json::json;

fn config(legacy_ro52_priority: bool) -> SearchConfig {
    SearchConfig { debounce_ms: 40, min_query_len: 2, legacy_ro52_priority }
}

#[tokio::test]
async fn typing_within_window_sends_one_request() {
    let portal = Arc::new(ScriptedPortal::new(Vec::new(), ro52_associations()));
    let suggester = SearchSuggester::new(portal.clone(), &config(false));

    let (first, second) = tokio::join!(suggester.suggest("ro"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        suggester.suggest("ro52").await
    });

    assert_eq!(first, Suggestions::Superseded);
    assert_eq!(second, Suggestions::Ready(vec!["Anti-Ro52".to_string()]));
    assert_eq!(portal.searches(), 1);
}

#[tokio::test]
async fn late_reply_is_dropped() {
    let portal = Arc::new(
        ScriptedPortal::new(Vec::new(), ro52_associations())
            .with_delay("anti", Duration::from_millis(150)),
    );
    let suggester = SearchSuggester::new(portal.clone(), &config(false));

    let (first, second) = tokio::join!(suggester.suggest("anti"), async {
        tokio::time::sleep(Duration::from_millis(80)).await;
        suggester.suggest("anti-ro").await
    });

    assert_eq!(first, Suggestions::Superseded);
    assert!(matches!(second, Suggestions::Ready(ref names) if names == &["Anti-Ro52"]));
    assert_eq!(portal.searches(), 2);
}

#[tokio::test]
async fn short_queries_are_not_sent() {
    let portal = Arc::new(ScriptedPortal::new(Vec::new(), ro52_associations()));
    let suggester = SearchSuggester::new(portal.clone(), &config(false));
    assert_eq!(suggester.suggest(" r ").await, Suggestions::TooShort);
    assert_eq!(portal.searches(), 0);
}

#[tokio::test]
async fn legacy_ordering_floats_ro52_spellings() {
    let rows = vec![
        association("Anti-dsDNA", json!({})),
        association("Anti-Ro/SSA", json!({})),
        association("Anti-dsDNA", json!({})),
        association("Anti-Jo1", json!({})),
    ];
    let plain = SearchSuggester::new(Arc::new(ScriptedPortal::new(Vec::new(), rows.clone())), &config(false));
    let legacy = SearchSuggester::new(Arc::new(ScriptedPortal::new(Vec::new(), rows)), &config(true));

    assert_eq!(
        plain.suggest("anti").await,
        Suggestions::Ready(vec!["Anti-dsDNA".into(), "Anti-Ro/SSA".into(), "Anti-Jo1".into()])
    );
    assert_eq!(
        legacy.suggest("anti").await,
        Suggestions::Ready(vec!["Anti-Ro/SSA".into(), "Anti-dsDNA".into(), "Anti-Jo1".into()])
    );
}
