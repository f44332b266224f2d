//! Store-independent query composition.
//!
//! A `DocumentQuery` is a disjunction of `Criteria`; each `Criteria` is a conjunction of
//! field predicates. An empty query matches every document.

use serde_json::Value;

/// A single field predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Field value equals `value` exactly
    Equals { field: String, value: String },
    /// Field value contains `value`, ignoring case
    Contains { field: String, value: String },
}

impl Criterion {
    pub fn field(&self) -> &str {
        match self {
            Criterion::Equals { field, .. } | Criterion::Contains { field, .. } => field,
        }
    }

    pub fn matches(&self, source: &Value) -> bool {
        let Some(actual) = source.get(self.field()).and_then(Value::as_str) else {
            return false;
        };

        match self {
            Criterion::Equals { value, .. } => actual == value,
            Criterion::Contains { value, .. } => {
                actual.to_lowercase().contains(&value.to_lowercase())
            }
        }
    }
}

/// Conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.push(Criterion::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn contains(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.push(Criterion::Contains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matches(&self, source: &Value) -> bool {
        self.criteria.iter().all(|c| c.matches(source))
    }
}

/// Disjunction of `Criteria`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    any_of: Vec<Criteria>,
}

impl DocumentQuery {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn matching(criteria: Criteria) -> Self {
        Self {
            any_of: vec![criteria],
        }
    }

    /// Adds an alternative branch.
    pub fn or(mut self, criteria: Criteria) -> Self {
        self.any_of.push(criteria);
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.any_of.is_empty()
    }

    pub fn branches(&self) -> &[Criteria] {
        &self.any_of
    }

    pub fn matches(&self, source: &Value) -> bool {
        self.is_match_all() || self.any_of.iter().any(|c| c.matches(source))
    }
}
