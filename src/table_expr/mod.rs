//! Table expressions: the operands a FROM clause is built from
//!
//! A table expression is anything that can appear after `FROM`: a base table
//! (optionally aliased), a join of two table expressions, or a join waiting to
//! be appended to a dynamic FROM clause. Each expression reports which table
//! names it brings into scope and which ones it references without providing,
//! so clause construction can reject malformed input before rendering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::sql_generator::{SqlFeature, ToSql};

mod dynamic_join;
mod expr;
mod join;
mod table;

pub use dynamic_join::{
    dynamic_cross_join, dynamic_full_outer_join, dynamic_inner_join, dynamic_join,
    dynamic_left_outer_join, dynamic_right_outer_join, DynamicJoin, DynamicPreJoin,
};
pub use expr::{col, lit, ColumnRef, Expr, Literal, Operator, OperatorApplication};
pub use join::{
    cross_join, full_outer_join, inner_join, join, left_outer_join, right_outer_join, Join,
    PreJoin,
};
pub use table::{table, Table};

/// Capabilities every FROM operand exposes.
pub trait TableExpression: ToSql + fmt::Debug + Send + Sync {
    /// Usable as a FROM operand.
    fn is_table(&self) -> bool;

    /// A join that still lacks its condition.
    fn is_pre_join(&self) -> bool {
        false
    }

    /// A join that can be appended to a dynamic FROM clause.
    fn is_dynamic_join(&self) -> bool {
        false
    }

    /// Right-hand side of a join meant for a dynamic FROM clause.
    fn joined_table(&self) -> Option<&dyn TableExpression> {
        None
    }

    /// Names this expression introduces into scope, with multiplicity.
    fn provided_tables(&self) -> Vec<String>;

    /// Names referenced here but provided elsewhere.
    fn required_tables(&self) -> BTreeSet<String>;

    /// Constructs a dialect must support to render this expression.
    fn required_features(&self) -> Vec<SqlFeature> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinType::Join => "JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT OUTER JOIN",
            JoinType::Right => "RIGHT OUTER JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

impl std::str::FromStr for JoinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "join" => Ok(JoinType::Join),
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            "full" => Ok(JoinType::Full),
            "cross" => Ok(JoinType::Cross),
            other => Err(format!("unknown join type '{}'", other)),
        }
    }
}

/// Required tables of a join: everything referenced by either side or the
/// condition that the join itself does not provide.
pub(crate) fn unresolved_tables(
    referenced: impl IntoIterator<Item = String>,
    provided: &[String],
) -> BTreeSet<String> {
    referenced
        .into_iter()
        .filter(|name| !provided.contains(name))
        .collect()
}
