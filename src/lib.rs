//! QueryKit - validated SQL statement construction
//!
//! This crate builds SQL statements from structured expressions instead of strings:
//! - Table and join expressions that report the names they provide and require
//! - FROM clauses validated at construction, static or dynamically extensible
//! - Dialect-aware rendering to SQL text

pub mod config;
pub mod errors;
pub mod query_spec;
pub mod sql_generator;
pub mod statement;
pub mod table_expr;

pub use errors::{BuildError, StatementError};
pub use sql_generator::{Dialect, DialectContext, SerializerContext, SqlFeature, ToSql};
pub use statement::{dynamic_from, from, FromClause, FromClauseData, NoFromClause, SelectStatement};
pub use table_expr::{col, lit, table, Expr, JoinType, Table, TableExpression};
