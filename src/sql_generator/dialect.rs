use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::table_expr::{JoinType, TableExpression};

/// A construct a dialect has to support to render an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SqlFeature {
    Join(JoinType),
    SchemaQualifiedName,
}

impl fmt::Display for SqlFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlFeature::Join(join_type) => write!(f, "{}", join_type.keyword()),
            SqlFeature::SchemaQualifiedName => write!(f, "schema-qualified table names"),
        }
    }
}

/// Rendering capabilities of a target database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    name: String,
    supports_dynamic_from: bool,
    unsupported_features: BTreeSet<SqlFeature>,
}

impl Dialect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_dynamic_from: true,
            unsupported_features: BTreeSet::new(),
        }
    }

    /// Dialect that renders everything and allows dynamic FROM clauses
    pub fn generic() -> Self {
        Self::new("generic")
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dynamic_from(mut self, enabled: bool) -> Self {
        self.supports_dynamic_from = enabled;
        self
    }

    pub fn without_feature(mut self, feature: SqlFeature) -> Self {
        self.unsupported_features.insert(feature);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supports_dynamic_from(&self) -> bool {
        self.supports_dynamic_from
    }

    pub fn supports(&self, feature: SqlFeature) -> bool {
        !self.unsupported_features.contains(&feature)
    }

    /// First construct in `expr` this dialect cannot render, if any.
    pub fn first_unsupported(&self, expr: &dyn TableExpression) -> Option<SqlFeature> {
        expr.required_features()
            .into_iter()
            .find(|feature| !self.supports(*feature))
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::generic()
    }
}

/// Database binding a statement is built against.
///
/// Static statements are `Unbound`; only a `Bound` context whose dialect
/// allows it can hold a dynamic FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialectContext {
    #[default]
    Unbound,
    Bound(Dialect),
}

impl DialectContext {
    pub fn bound(dialect: Dialect) -> Self {
        DialectContext::Bound(dialect)
    }

    pub fn supports_dynamic_from(&self) -> bool {
        match self {
            DialectContext::Unbound => false,
            DialectContext::Bound(dialect) => dialect.supports_dynamic_from(),
        }
    }

    /// Dialect used for rendering; unbound statements render generically.
    pub fn dialect(&self) -> Dialect {
        match self {
            DialectContext::Unbound => Dialect::generic(),
            DialectContext::Bound(dialect) => dialect.clone(),
        }
    }

    pub fn first_unsupported(&self, expr: &dyn TableExpression) -> Option<SqlFeature> {
        match self {
            DialectContext::Unbound => None,
            DialectContext::Bound(dialect) => dialect.first_unsupported(expr),
        }
    }
}
