//! Listing filters and pagination parameters.
//!
//! A [`QueryFilter`] is the validated subset of query parameters relevant to
//! a list operation: page, limit, and a set of structured, type-coerced
//! [`FilterClause`]s. Managers translate their resource-specific query
//! parameters into clauses; the persistence backend evaluates the clause set
//! for both the count and the page fetch, so the two always reflect the same
//! criteria.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::config::ApiConfig;

/// Comparison operator for a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Case-insensitive substring match on text fields.
    Like,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
}

/// Typed filter operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// One validated (field, operator, value) predicate.
#[derive(Debug, Clone)]
pub struct FilterClause {
    pub field: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl FilterClause {
    /// Equality on an integer field.
    pub fn eq_int(field: impl Into<String>, value: i64) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: FilterValue::Int(value),
        }
    }

    /// Equality on a boolean field.
    pub fn eq_bool(field: impl Into<String>, value: bool) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: FilterValue::Bool(value),
        }
    }

    /// Substring match on a text field.
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Like,
            value: FilterValue::Text(value.into()),
        }
    }

    /// Lower bound on a text field (lexicographic, e.g. ISO dates).
    pub fn gte_text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte,
            value: FilterValue::Text(value.into()),
        }
    }

    /// Upper bound on a text field (lexicographic, e.g. ISO dates).
    pub fn lte_text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte,
            value: FilterValue::Text(value.into()),
        }
    }

    /// Evaluate this clause against a JSON record. Records missing the
    /// field never match.
    pub fn matches(&self, record: &Value) -> bool {
        let field = match record.get(&self.field) {
            Some(v) => v,
            None => return false,
        };

        match (&self.op, &self.value) {
            (FilterOp::Eq, FilterValue::Int(expected)) => field.as_i64() == Some(*expected),
            (FilterOp::Eq, FilterValue::Bool(expected)) => field.as_bool() == Some(*expected),
            (FilterOp::Eq, FilterValue::Text(expected)) => field.as_str() == Some(expected),
            (FilterOp::Like, FilterValue::Text(needle)) => field
                .as_str()
                .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            (FilterOp::Gte, FilterValue::Int(bound)) => {
                field.as_i64().map(|v| v >= *bound).unwrap_or(false)
            }
            (FilterOp::Lte, FilterValue::Int(bound)) => {
                field.as_i64().map(|v| v <= *bound).unwrap_or(false)
            }
            (FilterOp::Gte, FilterValue::Text(bound)) => {
                field.as_str().map(|v| v >= bound.as_str()).unwrap_or(false)
            }
            (FilterOp::Lte, FilterValue::Text(bound)) => {
                field.as_str().map(|v| v <= bound.as_str()).unwrap_or(false)
            }
            // Remaining op/value combinations are not constructible through
            // the helpers above.
            _ => false,
        }
    }
}

/// Validated listing parameters handed to a manager's list operation.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    /// Page number, always >= 1.
    pub page: u64,

    /// Page size, clamped to 1..=max. A requested limit of 0 is clamped
    /// to 1 rather than meaning "unbounded".
    pub limit: u64,

    /// Structured predicates added by the manager.
    pub clauses: Vec<FilterClause>,

    params: HashMap<String, String>,
}

impl QueryFilter {
    /// Build a filter from raw query parameters, clamping page and limit
    /// into range. Out-of-range values are clamped, never rejected.
    pub fn from_params(params: &HashMap<String, String>, api: &ApiConfig) -> Self {
        let page = params
            .get("page")
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(1)
            .max(1);

        let limit = params
            .get("limit")
            .and_then(|l| l.parse::<u64>().ok())
            .unwrap_or(api.default_limit)
            .clamp(1, api.max_limit);

        Self {
            page,
            limit,
            clauses: Vec::new(),
            params: params.clone(),
        }
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Look up a raw manager-specific parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Add a structured predicate.
    pub fn push(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
    }

    /// Coerce a parameter to an integer clause, ignoring absent or
    /// non-numeric values.
    pub fn push_int_param(&mut self, key: &str, field: &str) {
        if let Some(value) = self.param(key).and_then(|v| v.parse::<i64>().ok()) {
            self.push(FilterClause::eq_int(field, value));
        }
    }

    /// Coerce a parameter to a boolean clause. Accepts 1/0/true/false.
    pub fn push_bool_param(&mut self, key: &str, field: &str) {
        let parsed = match self.param(key) {
            Some("1") | Some("true") => Some(true),
            Some("0") | Some("false") => Some(false),
            _ => None,
        };
        if let Some(value) = parsed {
            self.push(FilterClause::eq_bool(field, value));
        }
    }
}
