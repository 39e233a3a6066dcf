//! Randomized index-consistency checks across mixed operation sequences.

use rand::prelude::*;
use serde_json::{json, Value};

use crate::core::collection::Collection;

use super::indexes_are_consistent;

fn random_doc(rng: &mut impl Rng) -> Value {
    match rng.random_range(0..4) {
        0 => json!({ "v": rng.random_range(0..10), "w": "fixed" }),
        1 => json!({ "v": format!("s{}", rng.random_range(0..5)) }),
        2 => json!({ "v": rng.random_bool(0.5) }),
        _ => json!({ "other": 1 }),
    }
}

fn existing_id(rng: &mut impl Rng, collection: &Collection) -> Option<String> {
    if collection.is_empty() {
        return None;
    }
    let slot = rng.random_range(0..collection.len());
    collection.docs[slot]["_id"].as_str().map(str::to_string)
}

#[test]
fn test_indexes_stay_consistent_under_random_ops() {
    let mut rng = rand::rng();
    let mut items = Collection::new("items");
    items.create_index("v").unwrap();
    items.create_index("w").unwrap();

    for _ in 0..300 {
        match rng.random_range(0..5) {
            0 | 1 => {
                items.append(random_doc(&mut rng)).unwrap();
            }
            2 => {
                if let Some(id) = existing_id(&mut rng, &items) {
                    items.drop_by_id(&id);
                }
            }
            3 => {
                if let Some(id) = existing_id(&mut rng, &items) {
                    let patch = format!(r#"{{"v": {}}}"#, rng.random_range(0..10));
                    // conflicts are fine; the index must stay consistent anyway
                    let _ = items.update_by_id(&id, &patch);
                }
            }
            _ => {
                let query = format!(r#"{{"v": {}}}"#, rng.random_range(0..10));
                items.drop(&query, 2).unwrap();
            }
        }
        assert!(indexes_are_consistent(&items), "index diverged from array");
    }
}

#[test]
fn test_ids_stay_binary_searchable_under_churn() {
    let mut rng = rand::rng();
    let mut items = Collection::new("items");

    let mut live: Vec<String> = Vec::new();
    for _ in 0..200 {
        if live.is_empty() || rng.random_bool(0.7) {
            live.push(items.append(json!({"x": 1})).unwrap());
        } else {
            let id = live.swap_remove(rng.random_range(0..live.len()));
            assert!(items.drop_by_id(&id));
        }
    }

    for id in &live {
        assert!(items.find_one_by_id(id).is_some(), "lost document {}", id);
    }
    assert_eq!(items.len(), live.len());
}
