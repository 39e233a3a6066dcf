use serde_json::{json, Value};

use crate::core::collection::Collection;
use crate::core::cursor::DocumentCursor;

fn ages() -> Collection {
    let mut users = Collection::new("users");
    users.append(json!({"name": "A", "age": 1})).unwrap();
    users.append(json!({"name": "B", "age": 2})).unwrap();
    users.append(json!({"name": "C", "age": 1})).unwrap();
    users
}

fn parsed(doc: &str) -> Value {
    serde_json::from_str(doc).unwrap()
}

#[test]
fn test_find_one_returns_first_match_in_insertion_order() {
    let mut users = ages();
    let hit = users.find_one(r#"{"age": 1}"#).unwrap().unwrap();
    assert_eq!(parsed(&hit)["name"], json!("A"));
}

#[test]
fn test_find_one_no_match() {
    let mut users = ages();
    assert_eq!(users.find_one(r#"{"age": 99}"#).unwrap(), None);
    // empty results are not cached
    assert!(users.cache.is_empty());
}

#[test]
fn test_find_one_bad_query() {
    let mut users = ages();
    assert!(users.find_one("nope").is_err());
}

#[test]
fn test_find_with_index_yields_equal_range() {
    let mut users = ages();
    users.create_index("age").unwrap();

    let cursor = users.find(r#"{"age": 1}"#, 10).unwrap();
    assert!(matches!(cursor, DocumentCursor::Index(_)));
    let hits: Vec<Value> = cursor.map(|doc| parsed(&doc)).collect();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["name"], json!("A"));
    assert_eq!(hits[1]["name"], json!("C"));
}

#[test]
fn test_find_without_index_scans() {
    let users = ages();
    let cursor = users.find(r#"{"age": 1}"#, 10).unwrap();
    assert!(matches!(cursor, DocumentCursor::Linear(_)));
    assert_eq!(cursor.count(), 2);
}

#[test]
fn test_find_range_query_ignores_index() {
    let mut users = ages();
    users.create_index("age").unwrap();
    // only equality takes the index fast path
    let cursor = users.find(r#"{"age": {"$gte": 1}}"#, 10).unwrap();
    assert!(matches!(cursor, DocumentCursor::Linear(_)));
    assert_eq!(cursor.count(), 3);
}

#[test]
fn test_find_respects_limit() {
    let users = ages();
    let hits: Vec<String> = users.find("{}", 2).unwrap().collect();
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_find_one_uses_index_first_entry() {
    let mut users = ages();
    users.create_index("age").unwrap();
    let before = users.stats().index_lookups;

    let hit = users.find_one(r#"{"age": 1}"#).unwrap().unwrap();
    assert_eq!(parsed(&hit)["name"], json!("A"));
    assert_eq!(users.stats().index_lookups, before + 1);
}

#[test]
fn test_find_one_key_type_mismatch_misses_index_then_scans() {
    let mut users = ages();
    users.create_index("age").unwrap();
    // the index holds numeric keys; a string key finds nothing and the
    // linear fallback finds nothing either
    assert_eq!(users.find_one(r#"{"age": "1"}"#).unwrap(), None);
}

#[test]
fn test_find_one_caches_result() {
    let mut users = ages();
    let first = users.find_one(r#"{"age": 2}"#).unwrap().unwrap();
    let hits_before = users.stats().cache_hits;

    let second = users.find_one(r#"{"age": 2}"#).unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(users.stats().cache_hits, hits_before + 1);
}

#[test]
fn test_find_one_by_id_round_trips() {
    let mut users = Collection::new("users");
    let mut ids = Vec::new();
    for i in 0..50 {
        ids.push(users.append(json!({ "i": i })).unwrap());
    }

    for (i, id) in ids.iter().enumerate() {
        let doc = parsed(&users.find_one_by_id(id).unwrap());
        assert_eq!(doc["i"], json!(i));
        assert_eq!(doc["_id"], json!(id.clone()));
    }
}

#[test]
fn test_find_one_by_id_misses() {
    let mut users = Collection::new("users");
    users.append(json!({})).unwrap();
    assert_eq!(users.find_one_by_id("9999999999000001"), None);
    assert_eq!(users.find_one_by_id("not an id"), None);
    assert_eq!(users.find_one_by_id(""), None);
}

#[test]
fn test_find_one_by_id_on_empty_collection() {
    let users = Collection::new("users");
    assert_eq!(users.find_one_by_id("0000000001000001"), None);
}
