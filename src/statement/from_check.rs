//! Pre-construction checks for FROM clauses
//!
//! Every check is terminal: the first violated condition is reported and no
//! clause is built (or, for `add`, the clause is left untouched).

use std::collections::HashSet;

use crate::errors::BuildError;
use crate::sql_generator::DialectContext;
use crate::table_expr::TableExpression;

/// First name that occurs more than once, in order of appearance.
pub fn first_duplicate<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .find(|name| !seen.insert(name.as_str()))
        .cloned()
}

/// Checks shared by `from()` and `dynamic_from()`.
pub fn check_from(table: &dyn TableExpression) -> Result<(), BuildError> {
    if table.is_pre_join() {
        return Err(BuildError::NotAPreJoin);
    }
    if !table.is_table() {
        return Err(BuildError::NotATableExpression);
    }

    let required = table.required_tables();
    if !required.is_empty() {
        return Err(BuildError::UnresolvedDependency(
            required.into_iter().collect(),
        ));
    }

    if let Some(name) = first_duplicate(&table.provided_tables()) {
        return Err(BuildError::DuplicateTableName(name));
    }

    Ok(())
}

pub fn check_dynamic_from(
    context: &DialectContext,
    table: &dyn TableExpression,
) -> Result<(), BuildError> {
    if !context.supports_dynamic_from() {
        return Err(BuildError::DynamicNotSupported);
    }
    check_from(table)?;
    check_renderable(context, table)
}

/// Fails when the context's dialect cannot render `expr`.
pub fn check_renderable(
    context: &DialectContext,
    expr: &dyn TableExpression,
) -> Result<(), BuildError> {
    match context.first_unsupported(expr) {
        Some(feature) => Err(BuildError::UnserializableForDialect {
            dialect: context.dialect().name().to_string(),
            feature,
        }),
        None => Ok(()),
    }
}

/// Checks for appending `join` to a dynamic clause that already provides `known`.
pub fn check_add(
    context: &DialectContext,
    known: &[String],
    join: &dyn TableExpression,
) -> Result<(), BuildError> {
    if !join.is_dynamic_join() || join.is_table() || join.is_pre_join() {
        return Err(BuildError::NotAJoinExpression);
    }
    // The joined side must itself be a complete FROM operand.
    match join.joined_table() {
        Some(rhs) if rhs.is_table() && !rhs.is_pre_join() && !rhs.is_dynamic_join() => {}
        _ => return Err(BuildError::NotAJoinExpression),
    }

    // `known` is duplicate-free, so any repeat involves a name the join provides.
    let provided = join.provided_tables();
    if let Some(name) = first_duplicate(known.iter().chain(&provided)) {
        return Err(BuildError::DuplicateTableNameOnAdd(name));
    }

    check_renderable(context, join)
}
