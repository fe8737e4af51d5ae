// Section store: publication, fail-safe reload, reload policy and
// reader consistency under concurrent reloads

use std::sync::Arc;

use sections_transformer::core::error::TransformerError;
use sections_transformer::core::store::SectionStore;
use sections_transformer::core::transformer::transform;
use sections_transformer::core::types::RawTerm;

use crate::common::{africa_term, sample_terms, GatedSource, ScriptedSource};

fn labels(terms: &[RawTerm]) -> Vec<String> {
    terms.iter().map(|t| t.canonical_name.clone()).collect()
}

#[tokio::test]
async fn test_reload_twice_is_idempotent() {
    let source = ScriptedSource::new(sample_terms());
    let store = SectionStore::new(source.clone(), "Sections");

    store.reload().await.unwrap();
    let first = store.get_all().unwrap();

    store.reload().await.unwrap();
    let second = store.get_all().unwrap();

    assert_eq!(first, second);
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_snapshot() {
    let source = ScriptedSource::new(sample_terms());
    let store = SectionStore::new(source.clone(), "Sections");
    store.reload().await.unwrap();

    let count_before = store.get_count();
    let all_before = store.get_all();
    let ids_before = store.get_ids();

    source.set_failing(true);
    source.set_terms(vec![]);
    let err = store.reload().await.unwrap_err();
    assert!(err.is_source_error());

    assert_eq!(store.get_count(), count_before);
    assert_eq!(store.get_all(), all_before);
    assert_eq!(store.get_ids(), ids_before);
}

#[tokio::test]
async fn test_failed_initial_load_stays_unloaded() {
    let source = ScriptedSource::new(sample_terms());
    source.set_failing(true);
    let store = SectionStore::new(source.clone(), "Sections");

    assert!(store.reload().await.is_err());
    assert!(!store.is_loaded());
    assert!(store.get_all().is_none());
    assert_eq!(store.get_count(), 0);

    source.set_failing(false);
    store.reload().await.unwrap();
    assert_eq!(store.get_count(), sample_terms().len());
}

#[tokio::test]
async fn test_empty_source_is_loaded_but_empty() {
    let store = SectionStore::new(ScriptedSource::new(vec![]), "Sections");
    store.reload().await.unwrap();

    assert_eq!(store.get_count(), 0);
    assert_eq!(store.get_all(), Some(vec![]));
    assert!(store.get_ids().is_empty());
}

#[tokio::test]
async fn test_ids_follow_source_order() {
    let terms = sample_terms();
    let store = SectionStore::new(ScriptedSource::new(terms.clone()), "Sections");
    store.reload().await.unwrap();

    let expected: Vec<String> = terms.iter().map(|t| transform(t, "Sections").id).collect();
    assert_eq!(store.get_ids(), expected);

    let all = store.get_all().unwrap();
    let all_labels: Vec<String> = all.into_iter().map(|s| s.pref_label).collect();
    assert_eq!(all_labels, labels(&terms));
}

#[tokio::test]
async fn test_duplicate_raw_id_first_seen_wins() {
    let terms = vec![
        RawTerm::new("Africa Section", "Nstein_GL_AFTM_GL_164835"),
        RawTerm::new("Markets", "Nstein_GL_AFTM_GL_111"),
        RawTerm::new("Africa (renamed)", "Nstein_GL_AFTM_GL_164835"),
    ];
    let store = SectionStore::new(ScriptedSource::new(terms), "Sections");

    let stats = store.reload().await.unwrap();
    assert_eq!(stats.terms_fetched, 3);
    assert_eq!(stats.sections_loaded, 2);
    assert_eq!(stats.duplicates_skipped, 1);

    let africa = store
        .get_by_id("adb4f804-c3b6-3eca-8708-5edeec653a27")
        .unwrap();
    assert_eq!(africa.pref_label, "Africa Section");
    assert_eq!(store.get_ids()[0], africa.id);
}

#[tokio::test]
async fn test_get_by_id_absent_returns_none() {
    let store = SectionStore::new(ScriptedSource::new(vec![africa_term()]), "Sections");
    store.reload().await.unwrap();

    assert!(store.get_by_id("00000000-0000-0000-0000-000000000000").is_none());
    assert!(store.get_by_id("").is_none());
}

#[tokio::test]
async fn test_reload_replaces_removed_terms() {
    let source = ScriptedSource::new(sample_terms());
    let store = SectionStore::new(source.clone(), "Sections");
    store.reload().await.unwrap();

    source.set_terms(vec![africa_term()]);
    store.reload().await.unwrap();

    assert_eq!(store.get_count(), 1);
    let markets = transform(&sample_terms()[1], "Sections");
    assert!(store.get_by_id(&markets.id).is_none());
}

#[tokio::test]
async fn test_concurrent_reload_is_rejected() {
    let source = GatedSource::new(sample_terms());
    let store = Arc::new(SectionStore::new(source.clone(), "Sections"));

    let first = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.reload().await })
    };

    // Wait until the first reload is parked inside the fetch
    source.entered.notified().await;

    let second = store.reload().await;
    assert!(matches!(second, Err(TransformerError::ReloadInProgress)));

    // Reads keep working while the reload is in flight
    assert!(!store.is_loaded());
    assert_eq!(store.get_count(), 0);

    source.release.notify_one();
    let stats = first.await.unwrap().unwrap();
    assert_eq!(stats.sections_loaded, sample_terms().len());

    // The guard is free again once the first reload finished
    let store_after = Arc::clone(&store);
    let third = tokio::spawn(async move { store_after.reload().await });
    source.entered.notified().await;
    source.release.notify_one();
    assert!(third.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_connectivity_is_independent_of_reload() {
    let source = ScriptedSource::new(sample_terms());
    let store = SectionStore::new(source.clone(), "Sections");

    store.check_connectivity().await.unwrap();
    assert_eq!(source.fetch_count(), 0);
    assert!(!store.is_loaded());

    source.set_failing(true);
    assert!(store.check_connectivity().await.unwrap_err().is_source_error());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_snapshot() {
    let small: Vec<RawTerm> = sample_terms().into_iter().take(2).collect();
    let large: Vec<RawTerm> = (0..50)
        .map(|i| RawTerm::new(format!("Section {i}"), format!("raw-{i}")))
        .collect();

    let source = ScriptedSource::new(small.clone());
    let store = Arc::new(SectionStore::new(source.clone(), "Sections"));
    store.reload().await.unwrap();

    let reloader = {
        let store = Arc::clone(&store);
        let source = Arc::clone(&source);
        let (small, large) = (small.clone(), large.clone());
        tokio::spawn(async move {
            for i in 0..200 {
                source.set_terms(if i % 2 == 0 { large.clone() } else { small.clone() });
                store.reload().await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let small_labels = labels(&small);
    let large_labels = labels(&large);

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        let (small_labels, large_labels) = (small_labels.clone(), large_labels.clone());
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                let snapshot = store.snapshot().unwrap();
                let sections = snapshot.sections();
                assert_eq!(sections.len(), snapshot.len());
                assert_eq!(snapshot.ids().len(), snapshot.len());

                let seen: Vec<String> = sections.into_iter().map(|s| s.pref_label).collect();
                assert!(seen == small_labels || seen == large_labels);

                let all = store.get_all().unwrap();
                assert!(all.len() == small_labels.len() || all.len() == large_labels.len());
                tokio::task::yield_now().await;
            }
        }));
    }

    for reader in readers {
        reader.await.unwrap();
    }
    reloader.await.unwrap();
}
