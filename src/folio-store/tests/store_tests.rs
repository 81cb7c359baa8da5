//! Integration tests for the record store.
//!
//! ## Test Categories
//!
//! 1. **Construction**: content, order, deep copy, bounds validation
//! 2. **Rendering**: exact line format, empty collections
//! 3. **Failure**: simulated allocation failure leaves nothing behind
//! 4. **Properties**: iteration reproduces arbitrary inputs

use std::sync::Arc;

use proptest::prelude::*;

use folio_store::{
    ArticleCollection, FailingMemoryManager, MemoryManager, RecordStore, TrackingMemoryManager,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn rendered(collection: &ArticleCollection) -> String {
    let mut out = Vec::new();
    collection.render(&mut out).expect("render into Vec cannot fail");
    String::from_utf8(out).expect("rendered output is UTF-8")
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_construct_yields_inputs_in_order() {
    let store = RecordStore::unlimited();
    let collection = store
        .construct(&["Foo", "Bar", "Baz"], &[2001, 1999, -44], 3)
        .unwrap();

    let pairs: Vec<(String, i32)> = collection
        .iter()
        .map(|(title, year)| (title.to_string(), year))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Foo".to_string(), 2001),
            ("Bar".to_string(), 1999),
            ("Baz".to_string(), -44),
        ]
    );
}

#[test]
fn test_titles_are_deep_copied() {
    let mut titles = vec!["Foo".to_string(), "Bar".to_string()];
    let years = vec![2001, 1999];

    let collection = ArticleCollection::construct(&titles, &years, 2).unwrap();

    titles[0].clear();
    titles[0].push_str("Mutated");
    titles[1].make_ascii_uppercase();
    drop(titles);

    assert_eq!(collection.get(0).unwrap().title(), "Foo");
    assert_eq!(collection.get(1).unwrap().title(), "Bar");
}

#[test]
fn test_duplicate_titles_are_kept_separately() {
    let collection = ArticleCollection::construct(&["Same", "Same"], &[1, 2], 2).unwrap();
    let first = collection.get(0).unwrap().title();
    let second = collection.get(1).unwrap().title();

    assert_eq!(first, second);
    assert_ne!(first.as_ptr(), second.as_ptr());
}

#[test]
fn test_count_beyond_inputs_is_rejected() {
    let store = RecordStore::unlimited();

    assert!(
        store
            .construct(&["Foo", "Bar"], &[2001, 1999], 3)
            .unwrap_err()
            .is_invalid_argument()
    );
    assert!(
        store
            .construct(&["Foo", "Bar", "Baz"], &[2001], 2)
            .unwrap_err()
            .is_invalid_argument()
    );
    assert_eq!(store.manager().used(), 0);
}

#[test]
fn test_negative_count_is_rejected() {
    let err = RecordStore::unlimited()
        .construct(&["Foo"], &[2001], -3)
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_foo_bar() {
    let collection = RecordStore::unlimited()
        .construct(&["Foo", "Bar"], &[2001, 1999], 2)
        .unwrap();

    assert_eq!(
        rendered(&collection),
        "Article \"Foo\" is published on 2001\nArticle \"Bar\" is published on 1999\n"
    );
    // Rendering does not consume or alter the collection.
    assert_eq!(rendered(&collection).lines().count(), 2);
}

#[test]
fn test_empty_collection_renders_nothing() {
    let titles: Vec<String> = Vec::new();
    let collection = RecordStore::unlimited().construct(&titles, &[], 0).unwrap();

    assert!(collection.is_empty());
    assert_eq!(rendered(&collection), "");
}

// ============================================================================
// Failure
// ============================================================================

#[test]
fn test_second_title_copy_failure_leaks_nothing() {
    // Reservation 1 covers the record slots, 2..=4 the three titles.
    let failing = Arc::new(FailingMemoryManager::fail_on(3));
    let store = RecordStore::new(failing.clone());

    let err = store
        .construct(&["First", "Second", "Third"], &[1, 2, 3], 3)
        .unwrap_err();

    assert!(err.is_allocation());
    assert_eq!(failing.calls(), 3);
    assert_eq!(failing.used(), 0);
}

#[test]
fn test_slot_failure_leaks_nothing() {
    let failing = Arc::new(FailingMemoryManager::fail_on(1));
    let store = RecordStore::new(failing.clone());

    let err = store.construct(&["Foo"], &[1], 1).unwrap_err();
    assert!(err.is_allocation());
    assert_eq!(failing.used(), 0);
}

#[test]
fn test_budget_exhaustion_then_recovery() {
    let manager = Arc::new(TrackingMemoryManager::new(256));
    let store = RecordStore::new(manager.clone());

    let long = "x".repeat(300);
    let err = store.construct(&[long.as_str()], &[1], 1).unwrap_err();
    assert!(err.is_allocation());
    assert_eq!(manager.used(), 0);

    let collection = store.construct(&["Foo"], &[1], 1).unwrap();
    assert!(manager.used() > 0);
    collection.destroy();
    assert_eq!(manager.used(), 0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_iterate_reproduces_inputs(
        records in prop::collection::vec(("[^\\x00]{0,24}", any::<i32>()), 0..32)
    ) {
        let titles: Vec<String> = records.iter().map(|(t, _)| t.clone()).collect();
        let years: Vec<i32> = records.iter().map(|(_, y)| *y).collect();
        let manager = Arc::new(TrackingMemoryManager::unlimited());
        let store = RecordStore::new(manager.clone());

        let collection = store.construct(&titles, &years, records.len() as i64).unwrap();

        prop_assert_eq!(collection.len(), records.len());
        for ((title, year), (expected_title, expected_year)) in collection.iter().zip(&records) {
            prop_assert_eq!(title, expected_title.as_str());
            prop_assert_eq!(year, *expected_year);
        }

        collection.destroy();
        prop_assert_eq!(manager.used(), 0);
    }

    #[test]
    fn prop_prefix_construction(
        records in prop::collection::vec(("[a-z]{1,8}", any::<i32>()), 1..16),
        cut in 0usize..16,
    ) {
        let count = cut.min(records.len());
        let titles: Vec<&str> = records.iter().map(|(t, _)| t.as_str()).collect();
        let years: Vec<i32> = records.iter().map(|(_, y)| *y).collect();

        let collection = ArticleCollection::construct(&titles, &years, count).unwrap();
        let pairs: Vec<(&str, i32)> = collection.iter().collect();
        let expected: Vec<(&str, i32)> = titles
            .iter()
            .copied()
            .zip(years.iter().copied())
            .take(count)
            .collect();
        prop_assert_eq!(pairs, expected);
    }
}
