//! Filter evaluation against a single document.

use std::cmp::Ordering;

use serde_json::Value;

use crate::query::ast::{CompareOp, Comparison, Filter};

/// Does `doc` satisfy `filter`?
pub fn matches(filter: &Filter, doc: &Value) -> bool {
    match filter {
        Filter::All => true,
        Filter::Compare(cmp) => matches_comparison(cmp, doc),
        Filter::Exists { path, expected } => path.resolve(doc).is_some() == *expected,
        Filter::In { path, set, negate } => {
            let found = path
                .resolve(doc)
                .map(|value| set.iter().any(|item| value_eq(value, item)))
                .unwrap_or(false);
            found != *negate
        }
        Filter::And(clauses) => clauses.iter().all(|clause| matches(clause, doc)),
        Filter::Or(clauses) => clauses.iter().any(|clause| matches(clause, doc)),
        Filter::Not(clause) => !matches(clause, doc),
    }
}

fn matches_comparison(cmp: &Comparison, doc: &Value) -> bool {
    let resolved = cmp.path.resolve(doc);
    match cmp.op {
        CompareOp::Eq => resolved.is_some_and(|value| value_eq(value, &cmp.literal)),
        // $ne also matches documents where the field is absent
        CompareOp::Ne => !resolved.is_some_and(|value| value_eq(value, &cmp.literal)),
        CompareOp::Gt => ordered(resolved, &cmp.literal, |ord| ord == Ordering::Greater),
        CompareOp::Gte => ordered(resolved, &cmp.literal, |ord| ord != Ordering::Less),
        CompareOp::Lt => ordered(resolved, &cmp.literal, |ord| ord == Ordering::Less),
        CompareOp::Lte => ordered(resolved, &cmp.literal, |ord| ord != Ordering::Greater),
    }
}

fn ordered(resolved: Option<&Value>, literal: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    resolved
        .and_then(|value| compare_order(value, literal))
        .map(accept)
        .unwrap_or(false)
}

/// Equality with numeric widening: `1` and `1.0` compare equal, matching how
/// index keys treat numbers.
pub(crate) fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Ordering is defined for number pairs and string pairs only.
fn compare_order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
