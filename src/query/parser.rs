//! Query text to [`Filter`] compilation.
//!
//! Queries are JSON objects in a Mongo-flavored syntax:
//!
//! - `{}` matches everything
//! - `{"age": 21}` is an implicit equality comparison
//! - `{"age": {"$gte": 18, "$lt": 65}}` applies operators to one field
//! - `{"$or": [{"a": 1}, {"b": 2}]}`, `{"$and": […]}`, `{"$not": {…}}`
//!   combine sub-filters
//!
//! Several members of one object combine as a conjunction.

use serde_json::Value;

use crate::core::index::{FieldPath, ScalarKey};
use crate::error::{JayError, Result};
use crate::query::ast::{BasicComparison, CompareOp, Comparison, Filter};

/// Parse a query string into a filter expression tree.
pub fn parse(query: &str) -> Result<Filter> {
    let value: Value =
        serde_json::from_str(query).map_err(|e| JayError::Query(e.to_string()))?;
    compile(&value)
}

/// Fast path: recognize a query that is a single scalar comparison on one
/// field, suitable for an index lookup.
///
/// Returns `None` for anything else, including unparseable input; such
/// queries fall through to a linear scan where the full parser reports the
/// error.
pub fn parse_comparison(query: &str) -> Option<BasicComparison> {
    let value: Value = serde_json::from_str(query).ok()?;
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    let (field, member) = object.iter().next()?;
    if field.starts_with('$') {
        return None;
    }

    let (op, literal) = match member {
        Value::Object(ops) if ops.len() == 1 => {
            let (name, literal) = ops.iter().next()?;
            (operator(name)?, literal)
        }
        Value::Object(_) => return None,
        literal => (CompareOp::Eq, literal),
    };

    let key = ScalarKey::from_value(literal)?;
    Some(BasicComparison {
        field: field.clone(),
        op,
        key,
    })
}

fn operator(name: &str) -> Option<CompareOp> {
    match name {
        "$eq" => Some(CompareOp::Eq),
        "$ne" => Some(CompareOp::Ne),
        "$gt" => Some(CompareOp::Gt),
        "$gte" => Some(CompareOp::Gte),
        "$lt" => Some(CompareOp::Lt),
        "$lte" => Some(CompareOp::Lte),
        _ => None,
    }
}

fn compile(value: &Value) -> Result<Filter> {
    let object = value
        .as_object()
        .ok_or_else(|| JayError::Query("filter must be a JSON object".to_string()))?;

    let mut clauses = Vec::with_capacity(object.len());
    for (name, member) in object {
        clauses.push(compile_member(name, member)?);
    }

    Ok(match clauses.len() {
        0 => Filter::All,
        1 => clauses.remove(0),
        _ => Filter::And(clauses),
    })
}

fn compile_member(name: &str, member: &Value) -> Result<Filter> {
    match name {
        "$and" => Ok(Filter::And(compile_list(name, member)?)),
        "$or" => Ok(Filter::Or(compile_list(name, member)?)),
        "$not" => Ok(Filter::Not(Box::new(compile(member)?))),
        _ if name.starts_with('$') => {
            Err(JayError::Query(format!("unknown operator {:?}", name)))
        }
        field => compile_field(field, member),
    }
}

fn compile_list(name: &str, member: &Value) -> Result<Vec<Filter>> {
    let items = member
        .as_array()
        .filter(|items| !items.is_empty())
        .ok_or_else(|| {
            JayError::Query(format!("{} expects a non-empty array", name))
        })?;
    items.iter().map(compile).collect()
}

fn compile_field(field: &str, member: &Value) -> Result<Filter> {
    let path = FieldPath::compile(field)?;

    // An object whose members all start with '$' is an operator block;
    // any other value is an implicit equality literal.
    let ops = match member.as_object() {
        Some(ops) if !ops.is_empty() && ops.keys().all(|k| k.starts_with('$')) => ops,
        _ => {
            return Ok(Filter::Compare(Comparison {
                path,
                op: CompareOp::Eq,
                literal: member.clone(),
            }))
        }
    };

    let mut clauses = Vec::with_capacity(ops.len());
    for (name, literal) in ops {
        clauses.push(compile_operator(&path, name, literal)?);
    }
    Ok(match clauses.len() {
        1 => clauses.remove(0),
        _ => Filter::And(clauses),
    })
}

fn compile_operator(path: &FieldPath, name: &str, literal: &Value) -> Result<Filter> {
    if let Some(op) = operator(name) {
        return Ok(Filter::Compare(Comparison {
            path: path.clone(),
            op,
            literal: literal.clone(),
        }));
    }

    match name {
        "$exists" => {
            let expected = literal.as_bool().ok_or_else(|| {
                JayError::Query("$exists expects a boolean".to_string())
            })?;
            Ok(Filter::Exists {
                path: path.clone(),
                expected,
            })
        }
        "$in" | "$nin" => {
            let set = literal.as_array().ok_or_else(|| {
                JayError::Query(format!("{} expects an array", name))
            })?;
            Ok(Filter::In {
                path: path.clone(),
                set: set.clone(),
                negate: name == "$nin",
            })
        }
        _ => Err(JayError::Query(format!(
            "unknown operator {:?} for field {:?}",
            name,
            path.name()
        ))),
    }
}
