use thiserror::Error;

use crate::sql_generator::SqlFeature;

/// Precondition violations raised while building a FROM clause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("from() argument is a pre join, please use an explicit on() condition or unconditionally()")]
    NotAPreJoin,

    #[error("from() argument has to be a table or join expression")]
    NotATableExpression,

    #[error("at least one table depends on another table in from(): {}", .0.join(", "))]
    UnresolvedDependency(Vec<String>),

    #[error("at least one duplicate table name detected in from(): {0}")]
    DuplicateTableName(String),

    #[error("dynamic_from must not be called in a static statement")]
    DynamicNotSupported,

    #[error("from::add() must not be called for static from()")]
    NotDynamic,

    #[error("invalid argument in from::add(), expected dynamic_join")]
    NotAJoinExpression,

    #[error("must not use the same table name twice in from(): {0}")]
    DuplicateTableNameOnAdd(String),

    #[error("dialect '{dialect}' cannot render {feature}")]
    UnserializableForDialect { dialect: String, feature: SqlFeature },
}

/// Failures of the statement that owns the FROM clause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatementError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("statement already has a FROM clause")]
    FromAlreadySet,

    #[error("columns are referenced but the statement has no FROM clause")]
    MissingFromClause,

    #[error("table '{0}' is referenced but not provided by the FROM clause")]
    UnknownTable(String),
}
