use std::cmp::Ordering;
use std::convert::TryFrom;

use bson::{Bson, Document};

use crate::error::QueryError;

/// A single field condition. The set of operators is closed; anything the
/// store can't answer is unrepresentable rather than silently non-matching.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact equality against the value at the path.
    Eq(Bson),
    /// Non-empty intersection with an array field, or plain membership when
    /// the field holds a scalar.
    In(Vec<Bson>),
    Gte(Bson),
    Lte(Bson),
    /// Field presence must equal the given boolean.
    Exists(bool),
}

/// A conjunction of `(dotted path, condition)` terms. A document matches iff
/// every term matches; there is no OR/NOT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    terms: Vec<(String, Condition)>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn field(mut self, path: impl Into<String>, condition: Condition) -> Query {
        self.terms.push((path.into(), condition));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.terms
            .iter()
            .all(|(path, condition)| condition.matches(resolve(doc, path)))
    }
}

/// Walks a dotted path through nested sub-documents.
fn resolve<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut value = doc.get(segments.next()?)?;
    for segment in segments {
        value = value.as_document()?.get(segment)?;
    }
    Some(value)
}

impl Condition {
    fn matches(&self, value: Option<&Bson>) -> bool {
        match self {
            Condition::Eq(expected) => value == Some(expected),
            Condition::In(set) => match value {
                Some(Bson::Array(items)) => items.iter().any(|item| set.contains(item)),
                Some(scalar) => set.contains(scalar),
                None => false,
            },
            Condition::Gte(threshold) => value
                .and_then(|v| compare(v, threshold))
                .map_or(false, |ord| ord != Ordering::Less),
            Condition::Lte(threshold) => value
                .and_then(|v| compare(v, threshold))
                .map_or(false, |ord| ord != Ordering::Greater),
            Condition::Exists(expected) => value.is_some() == *expected,
        }
    }
}

/// Ordinal comparison for the value types the collections hold. Cross-type
/// comparisons yield `None` and therefore match nothing.
fn compare(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::Int32(a), Bson::Int32(b)) => Some(a.cmp(b)),
        (Bson::Int64(a), Bson::Int64(b)) => Some(a.cmp(b)),
        (Bson::Int32(a), Bson::Int64(b)) => Some(i64::from(*a).cmp(b)),
        (Bson::Int64(a), Bson::Int32(b)) => Some(a.cmp(&i64::from(*b))),
        (Bson::Double(a), Bson::Double(b)) => a.partial_cmp(b),
        _ => None,
    }
}

/// Accepts MongoDB-style filter documents: a literal value means equality,
/// an all-`$` document is a set of operators applied to the same path.
impl TryFrom<&Document> for Query {
    type Error = QueryError;

    fn try_from(filter: &Document) -> Result<Query, QueryError> {
        let mut query = Query::new();

        for (path, value) in filter {
            match value {
                Bson::Document(spec) if spec.keys().any(|k| k.starts_with('$')) => {
                    if !spec.keys().all(|k| k.starts_with('$')) {
                        return Err(QueryError::MixedCondition(path.clone()));
                    }
                    for (op, operand) in spec {
                        query = query.field(path.clone(), parse_operator(op, operand)?);
                    }
                }
                literal => query = query.field(path.clone(), Condition::Eq(literal.clone())),
            }
        }

        Ok(query)
    }
}

fn parse_operator(op: &str, operand: &Bson) -> Result<Condition, QueryError> {
    match op {
        "$in" => operand
            .as_array()
            .map(|set| Condition::In(set.clone()))
            .ok_or(QueryError::MalformedOperand {
                op: op.to_string(),
                expected: "an array of values",
            }),
        "$gte" => Ok(Condition::Gte(operand.clone())),
        "$lte" => Ok(Condition::Lte(operand.clone())),
        "$exists" => operand
            .as_bool()
            .map(Condition::Exists)
            .ok_or(QueryError::MalformedOperand {
                op: op.to_string(),
                expected: "a boolean",
            }),
        other => Err(QueryError::UnsupportedOperator(other.to_string())),
    }
}
