use serde_json::Value;

use crate::error::{JayError, Result};

/// Recursively merge `src` into `dst`.
///
/// Member handling, per source member:
/// - absent from `dst`: deep-copied in
/// - present with a different JSON type: the merge aborts with
///   [`JayError::MergeConflict`]; members merged before the conflict stay
///   applied
/// - both arrays: source elements are appended (no deduplication)
/// - both objects: merged recursively
/// - matching scalars: destination value is overwritten
pub fn merge_objects(dst: &mut Value, src: &Value) -> Result<()> {
    merge_at(dst, src, "")
}

fn merge_at(dst: &mut Value, src: &Value, path: &str) -> Result<()> {
    let (Some(dst_map), Some(src_map)) = (dst.as_object_mut(), src.as_object()) else {
        return Err(JayError::MergeConflict(path.to_string()));
    };

    for (name, src_val) in src_map {
        match dst_map.get_mut(name) {
            None => {
                dst_map.insert(name.clone(), src_val.clone());
            }
            Some(dst_val) => {
                if std::mem::discriminant(dst_val) != std::mem::discriminant(src_val) {
                    return Err(JayError::MergeConflict(member_path(path, name)));
                }
                match (dst_val, src_val) {
                    (Value::Array(dst_arr), Value::Array(src_arr)) => {
                        dst_arr.extend(src_arr.iter().cloned());
                    }
                    (dst_val @ Value::Object(_), src_val @ Value::Object(_)) => {
                        merge_at(dst_val, src_val, &member_path(path, name))?;
                    }
                    (dst_val, src_val) => {
                        *dst_val = src_val.clone();
                    }
                }
            }
        }
    }

    Ok(())
}

fn member_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
