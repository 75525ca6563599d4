//! Field selectors, filters and projections.
//!
//! Filters are expression trees over a document's serialized form. A store
//! driver translates the tree into its own query language; the in-memory
//! store evaluates it directly with [`Filter::matches`].

use crate::error::{RepositoryError, RepositoryResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Path of the key field in a serialized document.
pub const ID_FIELD: &str = "_id";

/// A field of document type `D`, addressed by dotted path.
pub struct Field<D> {
    path: String,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Field<D> {
    /// Creates a field selector from a dotted path (`"nested.some_date"`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Selects the key field.
    #[must_use]
    pub fn id() -> Self {
        Self::new(ID_FIELD)
    }

    /// Returns the dotted path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checks that the path has no empty segments.
    pub fn validate(&self) -> RepositoryResult<()> {
        validate_path(&self.path)
    }
}

impl<D> Clone for Field<D> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<D> PartialEq for Field<D> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<D> Eq for Field<D> {}

impl<D> fmt::Debug for Field<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self.path)
    }
}

impl<D> From<&str> for Field<D> {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl<D> From<String> for Field<D> {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Comparison operator of a filter leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

/// Untyped filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Matches every document.
    All,
    /// Compares a field against a value.
    Compare {
        /// Dotted field path.
        path: String,
        /// Operator.
        op: CompareOp,
        /// Operand.
        value: Value,
    },
    /// Field equals one of the values.
    In {
        /// Dotted field path.
        path: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Field presence check.
    Exists {
        /// Dotted field path.
        path: String,
        /// Whether the field must be present or absent.
        exists: bool,
    },
    /// All sub-expressions match.
    And(Vec<FilterExpr>),
    /// At least one sub-expression matches.
    Or(Vec<FilterExpr>),
    /// Sub-expression does not match.
    Not(Box<FilterExpr>),
}

impl FilterExpr {
    fn validate(&self) -> RepositoryResult<()> {
        match self {
            FilterExpr::All => Ok(()),
            FilterExpr::Compare { path, .. }
            | FilterExpr::In { path, .. }
            | FilterExpr::Exists { path, .. } => validate_path(path),
            FilterExpr::And(items) | FilterExpr::Or(items) => {
                items.iter().try_for_each(FilterExpr::validate)
            }
            FilterExpr::Not(inner) => inner.validate(),
        }
    }

    fn matches(&self, document: &Value) -> bool {
        match self {
            FilterExpr::All => true,
            FilterExpr::Compare { path, op, value } => match lookup(document, path) {
                Some(actual) => compare(actual, *op, value),
                None => *op == CompareOp::Ne,
            },
            FilterExpr::In { path, values } => lookup(document, path)
                .is_some_and(|actual| values.iter().any(|v| compare(actual, CompareOp::Eq, v))),
            FilterExpr::Exists { path, exists } => lookup(document, path).is_some() == *exists,
            FilterExpr::And(items) => items.iter().all(|item| item.matches(document)),
            FilterExpr::Or(items) => items.iter().any(|item| item.matches(document)),
            FilterExpr::Not(inner) => !inner.matches(document),
        }
    }
}

/// A predicate over documents of type `D`.
pub struct Filter<D> {
    expr: FilterExpr,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Filter<D> {
    fn from_expr(expr: FilterExpr) -> Self {
        Self {
            expr,
            _marker: PhantomData,
        }
    }

    fn compare(field: impl Into<Field<D>>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::from_expr(FilterExpr::Compare {
            path: field.into().path,
            op,
            value: value.into(),
        })
    }

    /// Matches every document.
    #[must_use]
    pub fn all() -> Self {
        Self::from_expr(FilterExpr::All)
    }

    /// Matches the document with the given key.
    pub fn by_id<K: Serialize + ?Sized>(key: &K) -> RepositoryResult<Self> {
        Ok(Self::compare(Field::id(), CompareOp::Eq, serde_json::to_value(key)?))
    }

    /// Field equals value. Array fields match when any element equals it.
    pub fn eq(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    /// Field differs from value (or is absent).
    pub fn ne(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    /// Field is greater than value.
    pub fn gt(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    /// Field is greater than or equal to value.
    pub fn gte(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    /// Field is less than value.
    pub fn lt(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    /// Field is less than or equal to value.
    pub fn lte(field: impl Into<Field<D>>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    /// Field equals one of the values.
    pub fn is_in<V: Into<Value>>(
        field: impl Into<Field<D>>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::from_expr(FilterExpr::In {
            path: field.into().path,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Field is present (`true`) or absent (`false`).
    pub fn exists(field: impl Into<Field<D>>, exists: bool) -> Self {
        Self::from_expr(FilterExpr::Exists {
            path: field.into().path,
            exists,
        })
    }

    /// Both filters match.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::from_expr(FilterExpr::And(vec![self.expr, other.expr]))
    }

    /// Either filter matches.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::from_expr(FilterExpr::Or(vec![self.expr, other.expr]))
    }

    /// Inverts the filter.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        Self::from_expr(FilterExpr::Not(Box::new(self.expr)))
    }

    /// Returns the untyped expression tree.
    #[must_use]
    pub fn expr(&self) -> &FilterExpr {
        &self.expr
    }

    /// Checks that every field path in the tree is well formed.
    pub fn validate(&self) -> RepositoryResult<()> {
        self.expr.validate()
    }

    /// Evaluates the filter against a serialized document.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.expr.matches(document)
    }
}

impl<D> Clone for Filter<D> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<D> PartialEq for Filter<D> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl<D> fmt::Debug for Filter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.expr).finish()
    }
}

/// Selection of fields returned by a projecting read.
pub struct Projection<D> {
    fields: Vec<String>,
    include_id: bool,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Projection<D> {
    /// Projects the given fields (plus the key field).
    pub fn new<F: Into<Field<D>>>(fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            fields: fields.into_iter().map(|f| f.into().path).collect(),
            include_id: true,
            _marker: PhantomData,
        }
    }

    /// Leaves the key field out of the projected document.
    #[must_use]
    pub fn exclude_id(mut self) -> Self {
        self.include_id = false;
        self
    }

    /// Returns the projected field paths.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Builds the projected sub-document. Missing fields are skipped.
    #[must_use]
    pub fn apply(&self, document: &Value) -> Value {
        let mut out = Map::new();
        if self.include_id {
            if let Some(id) = lookup(document, ID_FIELD) {
                out.insert(ID_FIELD.to_string(), id.clone());
            }
        }
        for path in &self.fields {
            if let Some(value) = lookup(document, path) {
                insert_path(&mut out, path, value.clone());
            }
        }
        Value::Object(out)
    }
}

impl<D> Clone for Projection<D> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            include_id: self.include_id,
            _marker: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Projection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("fields", &self.fields)
            .field("include_id", &self.include_id)
            .finish()
    }
}

fn validate_path(path: &str) -> RepositoryResult<()> {
    if path.is_empty() || path.split('.').any(str::is_empty) {
        Err(RepositoryError::invalid_filter(format!(
            "malformed field path '{path}'"
        )))
    } else {
        Ok(())
    }
}

/// Resolves a dotted path inside a serialized document.
#[must_use]
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

/// Writes `value` at a dotted path, creating intermediate objects and
/// replacing non-object intermediates.
pub fn set_path(document: &mut Value, path: &str, value: Value) {
    if !document.is_object() {
        *document = Value::Object(Map::new());
    }
    if let Value::Object(map) = document {
        insert_path(map, path, value);
    }
}

fn insert_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            target.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            set_path(child, rest, value);
        }
    }
}

fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    if let (Value::Array(items), CompareOp::Eq) = (actual, op) {
        if !expected.is_array() {
            return items.iter().any(|item| item == expected);
        }
    }
    match op {
        CompareOp::Eq => actual == expected,
        CompareOp::Ne => actual != expected,
        CompareOp::Gt => order(actual, expected) == Some(Ordering::Greater),
        CompareOp::Gte => matches!(
            order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        CompareOp::Lt => order(actual, expected) == Some(Ordering::Less),
        CompareOp::Lte => matches!(
            order(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

fn order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
