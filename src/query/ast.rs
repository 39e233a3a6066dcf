use serde_json::Value;

use crate::core::index::{FieldPath, ScalarKey};

/// Comparison operators applicable to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// One (field, operator, literal) comparison.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub path: FieldPath,
    pub op: CompareOp,
    pub literal: Value,
}

/// Parsed filter expression tree.
#[derive(Debug, Clone)]
pub enum Filter {
    /// The empty filter; matches every document.
    All,
    Compare(Comparison),
    Exists { path: FieldPath, expected: bool },
    In { path: FieldPath, set: Vec<Value>, negate: bool },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

/// Descriptor for a filter that reduces to a single scalar comparison on one
/// field. The collection uses it to plan index lookups instead of scans.
#[derive(Debug, Clone)]
pub struct BasicComparison {
    pub field: String,
    pub op: CompareOp,
    pub key: ScalarKey,
}
