//! Statement construction
//!
//! [`SelectStatement`] holds one slot per clause kind. The FROM slot starts as
//! [`NoFromClause`] and is replaced by a validated [`FromClause`] through
//! [`SelectStatement::from`] or [`SelectStatement::dynamic_from`]. A failed
//! check never attaches a clause: the builder returns the error instead of a
//! statement.

use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::StatementError;
use crate::sql_generator::{DialectContext, ToSql};
use crate::table_expr::{Expr, TableExpression};

pub mod from_check;
mod from_clause;

pub use from_clause::{FromClause, FromClauseData, NoFromClause};

#[derive(Debug, Clone)]
pub enum FromSlot {
    NoFrom(NoFromClause),
    From(FromClause),
}

impl Default for FromSlot {
    fn default() -> Self {
        FromSlot::NoFrom(NoFromClause)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectStatement {
    context: DialectContext,
    columns: Vec<Expr>,
    from: FromSlot,
    where_condition: Option<Expr>,
}

/// Statement with only a static FROM clause.
pub fn from<T: TableExpression + 'static>(table: T) -> Result<SelectStatement, StatementError> {
    SelectStatement::new().from(table)
}

/// Statement bound to `context` with a dynamic FROM clause.
pub fn dynamic_from<T: TableExpression + 'static>(
    context: DialectContext,
    table: T,
) -> Result<SelectStatement, StatementError> {
    SelectStatement::bound(context).dynamic_from(table)
}

impl SelectStatement {
    /// A static statement, not bound to any database dialect
    pub fn new() -> Self {
        Self::default()
    }

    /// A statement bound to `context`; only these may hold dynamic clauses
    pub fn bound(context: DialectContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &DialectContext {
        &self.context
    }

    pub fn columns(mut self, columns: Vec<Expr>) -> Self {
        self.columns = columns;
        self
    }

    pub fn where_(mut self, condition: Expr) -> Self {
        self.where_condition = Some(condition);
        self
    }

    pub fn from<T: TableExpression + 'static>(self, table: T) -> Result<Self, StatementError> {
        self.from_shared(Arc::new(table))
    }

    pub fn from_shared(mut self, table: Arc<dyn TableExpression>) -> Result<Self, StatementError> {
        let FromSlot::NoFrom(no_from) = &self.from else {
            return Err(StatementError::FromAlreadySet);
        };
        self.from = FromSlot::From(no_from.from_shared(table)?);
        Ok(self)
    }

    pub fn dynamic_from<T: TableExpression + 'static>(
        self,
        table: T,
    ) -> Result<Self, StatementError> {
        self.dynamic_from_shared(Arc::new(table))
    }

    pub fn dynamic_from_shared(
        mut self,
        table: Arc<dyn TableExpression>,
    ) -> Result<Self, StatementError> {
        let FromSlot::NoFrom(no_from) = &self.from else {
            return Err(StatementError::FromAlreadySet);
        };
        self.from = FromSlot::From(no_from.dynamic_from_shared(&self.context, table)?);
        Ok(self)
    }

    pub fn from_slot(&self) -> &FromSlot {
        &self.from
    }

    pub fn from_clause(&self) -> Option<&FromClause> {
        match &self.from {
            FromSlot::From(clause) => Some(clause),
            FromSlot::NoFrom(_) => None,
        }
    }

    pub fn from_clause_mut(&mut self) -> Option<&mut FromClause> {
        match &mut self.from {
            FromSlot::From(clause) => Some(clause),
            FromSlot::NoFrom(_) => None,
        }
    }

    pub fn selected_columns(&self) -> &[Expr] {
        &self.columns
    }

    pub fn where_condition(&self) -> Option<&Expr> {
        self.where_condition.as_ref()
    }

    /// Append a join to the statement's dynamic FROM clause.
    pub fn add<J: TableExpression + 'static>(&mut self, join: J) -> Result<(), StatementError> {
        let clause = self
            .from_clause_mut()
            .ok_or(StatementError::MissingFromClause)?;
        clause.add(join)?;
        Ok(())
    }

    fn referenced_tables(&self) -> BTreeSet<String> {
        self.columns
            .iter()
            .chain(self.where_condition.iter())
            .flat_map(Expr::referenced_tables)
            .collect()
    }

    /// Every table referenced by the select list or WHERE has to be provided
    /// by a consistent FROM clause the statement's dialect can render.
    pub fn check_consistency(&self) -> Result<(), StatementError> {
        let referenced = self.referenced_tables();

        let Some(clause) = self.from_clause() else {
            if self.columns.is_empty() || !referenced.is_empty() {
                return Err(StatementError::MissingFromClause);
            }
            return Ok(());
        };

        clause.check_consistency()?;
        let data = clause.data();
        from_check::check_renderable(&self.context, data.base())?;
        for join in data.dynamic_tables() {
            from_check::check_renderable(&self.context, join.as_ref())?;
        }

        let provided = clause.provided_tables();
        if let Some(unknown) = referenced.into_iter().find(|t| !provided.contains(t)) {
            return Err(StatementError::UnknownTable(unknown));
        }
        Ok(())
    }

    /// Render for the statement's dialect after checking consistency.
    pub fn to_sql_string(&self) -> Result<String, StatementError> {
        self.check_consistency()?;
        let sql = ToSql::to_sql_string(self, &self.context.dialect());
        debug!("rendered statement: {}", sql);
        Ok(sql)
    }
}
