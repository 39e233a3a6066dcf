use serde_json::json;

use crate::core::collection::Collection;
use crate::core::document_id;
use crate::error::JayError;

use super::indexes_are_consistent;

#[test]
fn test_append_stamps_id() {
    let mut users = Collection::new("users");
    let id = users.append(json!({"name": "Ada"})).unwrap();

    assert_eq!(id.len(), 16);
    assert!(document_id::decode(&id).is_some());

    let stored = users.find_one_by_id(&id).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(doc["name"], json!("Ada"));
    assert_eq!(doc["_id"], json!(id));
}

#[test]
fn test_append_preserves_insertion_order() {
    let mut users = Collection::new("users");
    for name in ["a", "b", "c"] {
        users.append(json!({ "name": name })).unwrap();
    }
    assert_eq!(users.len(), 3);
    assert_eq!(users.docs[0]["name"], json!("a"));
    assert_eq!(users.docs[2]["name"], json!("c"));
}

#[test]
fn test_append_ids_strictly_increase() {
    let mut users = Collection::new("users");
    let mut previous = users.append(json!({})).unwrap();
    for _ in 0..100 {
        let next = users.append(json!({})).unwrap();
        assert!(next > previous);
        previous = next;
    }
}

#[test]
fn test_append_rejects_non_objects() {
    let mut users = Collection::new("users");
    assert!(matches!(
        users.append(json!([1, 2])),
        Err(JayError::NotAnObject)
    ));
    assert!(matches!(users.append(json!(42)), Err(JayError::NotAnObject)));
    assert!(users.is_empty());
}

#[test]
fn test_append_json_parses() {
    let mut users = Collection::new("users");
    users.append_json(r#"{"name": "Ada"}"#).unwrap();
    assert_eq!(users.len(), 1);

    assert!(matches!(
        users.append_json("not json"),
        Err(JayError::Json(_))
    ));
    assert!(matches!(
        users.append_json("[1]"),
        Err(JayError::NotAnObject)
    ));
    assert_eq!(users.len(), 1);
}

#[test]
fn test_append_maintains_indexes() {
    let mut users = Collection::new("users");
    users.create_index("age").unwrap();

    users.append(json!({"age": 30})).unwrap();
    users.append(json!({"age": "thirty"})).unwrap();
    users.append(json!({"name": "no age"})).unwrap();

    assert!(indexes_are_consistent(&users));
    assert_eq!(users.indexes[0].len(), 2);
}

#[test]
fn test_append_keeps_query_cache() {
    let mut users = Collection::new("users");
    users.append(json!({"v": 1})).unwrap();
    users.find_one(r#"{"v": 1}"#).unwrap().unwrap();
    assert_eq!(users.cache.len(), 1);

    // appends only add documents behind cached first matches
    users.append(json!({"v": 1})).unwrap();
    assert_eq!(users.cache.len(), 1);
    let hit = users.find_one(r#"{"v": 1}"#).unwrap().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&hit).unwrap();
    assert_eq!(doc["v"], json!(1));
}
