//! Declarative query descriptions
//!
//! A [`QuerySpec`] describes a SELECT statement in YAML or JSON: a select
//! list, a base table expression, an optional WHERE and a list of joins to
//! append after construction. Building it goes through the same validated
//! FROM clause construction as the Rust API, so malformed descriptions fail
//! with the same errors.
//!
//! ```yaml
//! dynamic: true
//! select: [orders.id, customers.name]
//! from:
//!   table: orders
//! add:
//!   - table: { table: customers }
//!     on:
//!       - { left: orders.customer_id, column: customers.id }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::errors::StatementError;
use crate::sql_generator::DialectContext;
use crate::statement::SelectStatement;
use crate::table_expr::{
    col, DynamicPreJoin, Expr, JoinType, Literal, PreJoin, Table, TableExpression,
};

#[derive(Debug, Error)]
pub enum QuerySpecError {
    #[error("failed to read query file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML query: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON query: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported literal value: {0}")]
    InvalidLiteral(String),

    #[error(transparent)]
    Statement(#[from] StatementError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Dialect preset to render for; the CLI may override it
    #[serde(default)]
    pub dialect: Option<String>,

    /// Build a dynamic FROM clause
    #[serde(default)]
    pub dynamic: bool,

    /// Column references such as `orders.id`; empty selects `*`
    #[serde(default)]
    pub select: Vec<String>,

    pub from: TableExprSpec,

    #[serde(default, rename = "where")]
    pub where_conditions: Vec<ConditionSpec>,

    /// Joins appended to the FROM clause after construction
    #[serde(default)]
    pub add: Vec<AddSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableExprSpec {
    Join { join: JoinSpec },
    Table(TableSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub table: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    #[serde(rename = "type", default = "default_join_type")]
    pub join_type: JoinType,
    pub left: Box<TableExprSpec>,
    pub right: Box<TableExprSpec>,
    /// Join condition; without it (and without `unconditional`) the join stays a pre-join
    #[serde(default)]
    pub on: Vec<ConditionSpec>,
    #[serde(default)]
    pub unconditional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSpec {
    #[serde(rename = "type", default = "default_join_type")]
    pub join_type: JoinType,
    pub table: TableExprSpec,
    #[serde(default)]
    pub on: Vec<ConditionSpec>,
    #[serde(default)]
    pub unconditional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub left: String,
    #[serde(default)]
    pub op: CompareOp,
    #[serde(flatten)]
    pub right: OperandSpec,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    #[default]
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandSpec {
    Column(String),
    Value(serde_json::Value),
}

fn default_join_type() -> JoinType {
    JoinType::Join
}

impl QuerySpec {
    pub fn from_yaml_str(content: &str) -> Result<Self, QuerySpecError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, QuerySpecError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a `.json` file, or YAML for any other extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuerySpecError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Build the statement against `context`, appending every `add` entry in order.
    pub fn build(&self, context: DialectContext) -> Result<SelectStatement, QuerySpecError> {
        let base = self.from.to_expression()?;
        let statement = SelectStatement::bound(context)
            .columns(self.select.iter().map(|c| col(c)).collect());
        let statement = match conditions_to_expr(&self.where_conditions)? {
            Some(condition) => statement.where_(condition),
            None => statement,
        };

        let mut statement = if self.dynamic {
            statement.dynamic_from_shared(base)?
        } else {
            statement.from_shared(base)?
        };

        for add in &self.add {
            let join = add.to_expression()?;
            let clause = statement
                .from_clause_mut()
                .ok_or(StatementError::MissingFromClause)?;
            clause.add_shared(join).map_err(StatementError::from)?;
        }

        Ok(statement)
    }
}

impl TableExprSpec {
    pub fn to_expression(&self) -> Result<Arc<dyn TableExpression>, QuerySpecError> {
        match self {
            TableExprSpec::Table(spec) => {
                let mut table = Table::new(&spec.table);
                if let Some(schema) = &spec.schema {
                    table = table.in_schema(schema);
                }
                if let Some(alias) = &spec.alias {
                    table = table.alias(alias);
                }
                Ok(Arc::new(table))
            }
            TableExprSpec::Join { join } => {
                let pre = PreJoin::new(
                    join.join_type,
                    join.left.to_expression()?,
                    join.right.to_expression()?,
                );
                match conditions_to_expr(&join.on)? {
                    Some(condition) => Ok(Arc::new(pre.on(condition))),
                    None if join.unconditional => Ok(Arc::new(pre.unconditionally())),
                    None => Ok(Arc::new(pre)),
                }
            }
        }
    }
}

impl AddSpec {
    pub fn to_expression(&self) -> Result<Arc<dyn TableExpression>, QuerySpecError> {
        let pre = DynamicPreJoin::new(self.join_type, self.table.to_expression()?);
        match conditions_to_expr(&self.on)? {
            Some(condition) => Ok(Arc::new(pre.on(condition))),
            None if self.unconditional => Ok(Arc::new(pre.unconditionally())),
            None => Ok(Arc::new(pre)),
        }
    }
}

impl ConditionSpec {
    pub fn to_expr(&self) -> Result<Expr, QuerySpecError> {
        let left = col(&self.left);
        let right = match &self.right {
            OperandSpec::Column(reference) => col(reference),
            OperandSpec::Value(value) => Expr::Literal(json_to_literal(value)?),
        };
        Ok(match self.op {
            CompareOp::Eq => left.eq(right),
            CompareOp::Ne => left.ne(right),
            CompareOp::Lt => left.lt(right),
            CompareOp::Gt => left.gt(right),
            CompareOp::Le => left.le(right),
            CompareOp::Ge => left.ge(right),
        })
    }
}

/// AND of all conditions, `None` when the list is empty.
fn conditions_to_expr(conditions: &[ConditionSpec]) -> Result<Option<Expr>, QuerySpecError> {
    let mut combined: Option<Expr> = None;
    for condition in conditions {
        let expr = condition.to_expr()?;
        combined = Some(match combined {
            Some(acc) => acc.and(expr),
            None => expr,
        });
    }
    Ok(combined)
}

fn json_to_literal(value: &serde_json::Value) -> Result<Literal, QuerySpecError> {
    match value {
        serde_json::Value::Null => Ok(Literal::Null),
        serde_json::Value::Bool(b) => Ok(Literal::Boolean(*b)),
        serde_json::Value::String(s) => Ok(Literal::String(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Literal::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Literal::Float(f))
            } else {
                Err(QuerySpecError::InvalidLiteral(n.to_string()))
            }
        }
        other => Err(QuerySpecError::InvalidLiteral(other.to_string())),
    }
}
