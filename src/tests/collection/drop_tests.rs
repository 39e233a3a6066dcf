use serde_json::json;

use crate::core::collection::Collection;

use super::{collection_with_ids, indexes_are_consistent};

#[test]
fn test_drop_by_id_removes_and_maintains_indexes() {
    let mut items = Collection::new("items");
    items.create_index("v").unwrap();
    let ids: Vec<String> = (0..5)
        .map(|i| items.append(json!({ "v": i })).unwrap())
        .collect();

    assert!(items.drop_by_id(&ids[1]));
    assert_eq!(items.len(), 4);
    assert!(indexes_are_consistent(&items));

    // the later documents are still reachable through their shifted slots
    let hit = items.find_one(r#"{"v": 4}"#).unwrap();
    assert!(hit.is_some());
    // and by id
    assert!(items.find_one_by_id(&ids[4]).is_some());
    assert!(items.find_one_by_id(&ids[1]).is_none());
}

#[test]
fn test_drop_by_id_missing() {
    let mut items = Collection::new("items");
    items.append(json!({})).unwrap();
    assert!(!items.drop_by_id("9999999999000001"));
    assert_eq!(items.len(), 1);
}

#[test]
fn test_drop_by_id_clears_cache() {
    let mut items = Collection::new("items");
    let id = items.append(json!({"v": 1})).unwrap();
    items.find_one(r#"{"v": 1}"#).unwrap().unwrap();
    assert!(!items.cache.is_empty());

    items.drop_by_id(&id);
    assert!(items.cache.is_empty());
    assert_eq!(items.find_one(r#"{"v": 1}"#).unwrap(), None);
}

#[test]
fn test_drop_removes_matches_and_reports_count() {
    let mut items = Collection::new("items");
    for v in 1..=100 {
        items.append(json!({ "v": v })).unwrap();
    }

    let removed = items.drop(r#"{"v": {"$gt": 50}}"#, 1000).unwrap();
    assert_eq!(removed, 50);
    assert_eq!(items.len(), 50);
    assert_eq!(items.find(r#"{"v": {"$gt": 50}}"#, 1000).unwrap().count(), 0);
}

#[test]
fn test_drop_respects_limit() {
    let mut items = Collection::new("items");
    for _ in 0..10 {
        items.append(json!({"kind": "x"})).unwrap();
    }
    let removed = items.drop(r#"{"kind": "x"}"#, 3).unwrap();
    assert_eq!(removed, 3);
    assert_eq!(items.len(), 7);
}

#[test]
fn test_drop_one() {
    let mut items = Collection::new("items");
    items.append(json!({"v": 1, "name": "first"})).unwrap();
    items.append(json!({"v": 1, "name": "second"})).unwrap();

    assert_eq!(items.drop_one(r#"{"v": 1}"#).unwrap(), 1);
    assert_eq!(items.len(), 1);
    assert_eq!(items.docs[0]["name"], json!("second"));
}

#[test]
fn test_drop_rebuilds_indexes() {
    let mut items = Collection::new("items");
    items.create_index("v").unwrap();
    for v in 0..20 {
        items.append(json!({ "v": v % 4 })).unwrap();
    }

    items.drop(r#"{"v": 2}"#, 1000).unwrap();
    assert!(indexes_are_consistent(&items));
}

#[test]
fn test_drop_no_match_keeps_cache() {
    let mut items = Collection::new("items");
    items.append(json!({"v": 1})).unwrap();
    items.find_one(r#"{"v": 1}"#).unwrap().unwrap();

    assert_eq!(items.drop(r#"{"v": 9}"#, 10).unwrap(), 0);
    assert!(!items.cache.is_empty());
}

#[test]
fn test_drop_bad_query() {
    let mut items = Collection::new("items");
    items.append(json!({})).unwrap();
    assert!(items.drop("nope", 10).is_err());
    assert_eq!(items.len(), 1);
}

#[test]
fn test_drop_older_than_removes_the_aged_prefix() {
    let mut events = collection_with_ids(
        "events",
        &[
            (100, 1, json!({"n": 0})),
            (100, 2, json!({"n": 1})),
            (101, 1, json!({"n": 2})),
            (102, 1, json!({"n": 3})),
            (102, 2, json!({"n": 4})),
        ],
    );

    // cutoff (t+1) seconds removes everything stamped at or before t
    let removed = events.drop_older_than(101 * 1000);
    assert_eq!(removed, 2);
    assert_eq!(events.len(), 3);
    assert_eq!(events.docs[0]["n"], json!(2));
}

#[test]
fn test_drop_older_than_keeps_the_cutoff_second() {
    let mut events = collection_with_ids(
        "events",
        &[
            (100, 1, json!({})),
            (101, 1, json!({})),
            (101, 2, json!({})),
        ],
    );

    assert_eq!(events.drop_older_than(101 * 1000), 1);
    assert_eq!(events.len(), 2);
}

#[test]
fn test_drop_older_than_empty_collection() {
    let mut events = Collection::new("events");
    assert_eq!(events.drop_older_than(u64::MAX), 0);
}

#[test]
fn test_drop_older_than_nothing_old_enough() {
    let mut events = collection_with_ids("events", &[(100, 1, json!({}))]);
    assert_eq!(events.drop_older_than(50 * 1000), 0);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_drop_older_than_rebuilds_indexes_and_clears_cache() {
    let mut events = collection_with_ids(
        "events",
        &[
            (100, 1, json!({"v": 1})),
            (200, 1, json!({"v": 1})),
            (300, 1, json!({"v": 2})),
        ],
    );
    events.create_index("v").unwrap();
    events.find_one(r#"{"v": 1}"#).unwrap().unwrap();

    let removed = events.drop_older_than(250 * 1000);
    assert_eq!(removed, 2);
    assert!(events.cache.is_empty());
    assert!(indexes_are_consistent(&events));
    assert_eq!(events.find(r#"{"v": 1}"#, 10).unwrap().count(), 0);
}
