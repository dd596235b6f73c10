use log::{debug, warn};
use std::sync::Arc;

use super::from_check::{check_add, check_dynamic_from, check_from, first_duplicate};
use crate::errors::BuildError;
use crate::sql_generator::DialectContext;
use crate::table_expr::TableExpression;

/// State of a FROM clause: the base expression plus joins appended later.
#[derive(Debug, Clone)]
pub struct FromClauseData {
    base: Arc<dyn TableExpression>,
    dynamic_tables: Vec<Arc<dyn TableExpression>>,
}

impl FromClauseData {
    fn new(base: Arc<dyn TableExpression>) -> Self {
        Self {
            base,
            dynamic_tables: Vec::new(),
        }
    }

    pub fn base(&self) -> &dyn TableExpression {
        self.base.as_ref()
    }

    /// Appended joins, in append order
    pub fn dynamic_tables(&self) -> &[Arc<dyn TableExpression>] {
        &self.dynamic_tables
    }

    /// Names provided by the base and every appended join.
    pub fn provided_tables(&self) -> Vec<String> {
        let mut provided = self.base.provided_tables();
        for table in &self.dynamic_tables {
            provided.extend(table.provided_tables());
        }
        provided
    }
}

/// A validated FROM clause.
///
/// `Static` clauses are fixed at construction. `Dynamic` clauses carry the
/// dialect context they were built against and accept further joins through
/// [`FromClause::add`].
#[derive(Debug, Clone)]
pub enum FromClause {
    Static(FromClauseData),
    Dynamic(FromClauseData, DialectContext),
}

impl FromClause {
    pub fn data(&self) -> &FromClauseData {
        match self {
            FromClause::Static(data) | FromClause::Dynamic(data, _) => data,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, FromClause::Dynamic(..))
    }

    /// Dialect context of a dynamic clause
    pub fn context(&self) -> Option<&DialectContext> {
        match self {
            FromClause::Static(_) => None,
            FromClause::Dynamic(_, context) => Some(context),
        }
    }

    pub fn provided_tables(&self) -> Vec<String> {
        self.data().provided_tables()
    }

    /// Append a join to a dynamic clause.
    ///
    /// Leaves the clause unchanged on any error.
    pub fn add<J: TableExpression + 'static>(&mut self, join: J) -> Result<(), BuildError> {
        self.add_shared(Arc::new(join))
    }

    pub fn add_shared(&mut self, join: Arc<dyn TableExpression>) -> Result<(), BuildError> {
        let FromClause::Dynamic(data, context) = self else {
            warn!("rejected from::add({:?}): {}", join, BuildError::NotDynamic);
            return Err(BuildError::NotDynamic);
        };

        let known = data.provided_tables();
        if let Err(e) = check_add(context, &known, join.as_ref()) {
            warn!("rejected from::add({:?}): {}", join, e);
            return Err(e);
        }

        debug!(
            "from::add appended join #{} providing {:?}",
            data.dynamic_tables.len() + 1,
            join.provided_tables()
        );
        data.dynamic_tables.push(join);
        Ok(())
    }

    /// Confirms the clause still satisfies its construction invariants:
    /// a dependency-free base and unique names across base and appended joins.
    pub fn check_consistency(&self) -> Result<(), BuildError> {
        let data = self.data();
        check_from(data.base())?;
        if let Some(name) = first_duplicate(&data.provided_tables()) {
            return Err(BuildError::DuplicateTableName(name));
        }
        if let FromClause::Static(data) = self {
            debug_assert!(data.dynamic_tables.is_empty());
        }
        Ok(())
    }
}

/// The FROM slot of a statement before a clause has been attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFromClause;

impl NoFromClause {
    pub fn from<T: TableExpression + 'static>(&self, table: T) -> Result<FromClause, BuildError> {
        self.from_shared(Arc::new(table))
    }

    pub fn from_shared(&self, table: Arc<dyn TableExpression>) -> Result<FromClause, BuildError> {
        check_from(table.as_ref())?;
        debug!("from() built static clause over {:?}", table.provided_tables());
        Ok(FromClause::Static(FromClauseData::new(table)))
    }

    pub fn dynamic_from<T: TableExpression + 'static>(
        &self,
        context: &DialectContext,
        table: T,
    ) -> Result<FromClause, BuildError> {
        self.dynamic_from_shared(context, Arc::new(table))
    }

    pub fn dynamic_from_shared(
        &self,
        context: &DialectContext,
        table: Arc<dyn TableExpression>,
    ) -> Result<FromClause, BuildError> {
        check_dynamic_from(context, table.as_ref())?;
        debug!(
            "dynamic_from() built clause over {:?} for dialect '{}'",
            table.provided_tables(),
            context.dialect().name()
        );
        Ok(FromClause::Dynamic(
            FromClauseData::new(table),
            context.clone(),
        ))
    }
}
