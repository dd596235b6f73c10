use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::TableExpression;
use crate::sql_generator::{SerializerContext, SqlFeature, ToSql};

/// A base table, optionally schema-qualified and aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub schema: Option<String>,
    pub name: String,
    /// Name the table is known by inside the statement
    pub alias: Option<String>,
}

pub fn table(name: impl Into<String>) -> Table {
    Table::new(name)
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The name columns use to reference this table
    pub fn scope_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl TableExpression for Table {
    fn is_table(&self) -> bool {
        true
    }

    fn provided_tables(&self) -> Vec<String> {
        vec![self.scope_name().to_string()]
    }

    fn required_tables(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn required_features(&self) -> Vec<SqlFeature> {
        if self.schema.is_some() {
            vec![SqlFeature::SchemaQualifiedName]
        } else {
            Vec::new()
        }
    }
}

impl ToSql for Table {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        if let Some(schema) = &self.schema {
            ctx.push_str(schema);
            ctx.push('.');
        }
        ctx.push_str(&self.name);
        if let Some(alias) = &self.alias {
            ctx.push_str(" AS ");
            ctx.push_str(alias);
        }
    }
}
