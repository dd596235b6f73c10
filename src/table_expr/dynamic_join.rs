use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::{unresolved_tables, Expr, JoinType, TableExpression};
use crate::sql_generator::{SerializerContext, SqlFeature, ToSql};

/// Right-hand side of a join to be appended to a dynamic FROM clause,
/// still lacking its condition.
#[derive(Clone)]
pub struct DynamicPreJoin {
    join_type: JoinType,
    rhs: Arc<dyn TableExpression>,
}

/// A join ready to be appended to a dynamic FROM clause.
///
/// Renders with a leading space and its join keyword, e.g.
/// `" JOIN customers ON orders.id = customers.order_id"`, so appended joins
/// concatenate directly after the base table.
#[derive(Clone)]
pub struct DynamicJoin {
    join_type: JoinType,
    rhs: Arc<dyn TableExpression>,
    condition: Option<Expr>,
}

pub fn dynamic_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Join, Arc::new(rhs))
}

pub fn dynamic_inner_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Inner, Arc::new(rhs))
}

pub fn dynamic_left_outer_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Left, Arc::new(rhs))
}

pub fn dynamic_right_outer_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Right, Arc::new(rhs))
}

pub fn dynamic_full_outer_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Full, Arc::new(rhs))
}

pub fn dynamic_cross_join<R: TableExpression + 'static>(rhs: R) -> DynamicPreJoin {
    DynamicPreJoin::new(JoinType::Cross, Arc::new(rhs))
}

impl DynamicPreJoin {
    pub fn new(join_type: JoinType, rhs: Arc<dyn TableExpression>) -> Self {
        Self { join_type, rhs }
    }

    pub fn on(self, condition: Expr) -> DynamicJoin {
        DynamicJoin {
            join_type: self.join_type,
            rhs: self.rhs,
            condition: Some(condition),
        }
    }

    pub fn unconditionally(self) -> DynamicJoin {
        DynamicJoin {
            join_type: self.join_type,
            rhs: self.rhs,
            condition: None,
        }
    }
}

impl DynamicJoin {
    pub fn join_type(&self) -> JoinType {
        self.join_type
    }
}

fn dynamic_features(join_type: JoinType, rhs: &dyn TableExpression) -> Vec<SqlFeature> {
    let mut features = rhs.required_features();
    features.push(SqlFeature::Join(join_type));
    features
}

impl TableExpression for DynamicPreJoin {
    fn is_table(&self) -> bool {
        false
    }

    fn is_pre_join(&self) -> bool {
        true
    }

    fn joined_table(&self) -> Option<&dyn TableExpression> {
        Some(self.rhs.as_ref())
    }

    fn provided_tables(&self) -> Vec<String> {
        self.rhs.provided_tables()
    }

    fn required_tables(&self) -> BTreeSet<String> {
        self.rhs.required_tables()
    }

    fn required_features(&self) -> Vec<SqlFeature> {
        dynamic_features(self.join_type, self.rhs.as_ref())
    }
}

impl TableExpression for DynamicJoin {
    fn is_table(&self) -> bool {
        false
    }

    fn is_dynamic_join(&self) -> bool {
        true
    }

    fn joined_table(&self) -> Option<&dyn TableExpression> {
        Some(self.rhs.as_ref())
    }

    fn provided_tables(&self) -> Vec<String> {
        self.rhs.provided_tables()
    }

    /// Tables the condition references outside the joined side; these are
    /// expected to be provided by the clause the join is added to.
    fn required_tables(&self) -> BTreeSet<String> {
        let provided = self.provided_tables();
        let referenced = self.rhs.required_tables().into_iter().chain(
            self.condition
                .iter()
                .flat_map(|condition| condition.referenced_tables()),
        );
        unresolved_tables(referenced, &provided)
    }

    fn required_features(&self) -> Vec<SqlFeature> {
        dynamic_features(self.join_type, self.rhs.as_ref())
    }
}

impl ToSql for DynamicPreJoin {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        ctx.push(' ');
        ctx.push_str(self.join_type.keyword());
        ctx.push(' ');
        self.rhs.to_sql(ctx);
    }
}

impl ToSql for DynamicJoin {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        ctx.push(' ');
        ctx.push_str(self.join_type.keyword());
        ctx.push(' ');
        self.rhs.to_sql(ctx);
        if let Some(condition) = &self.condition {
            ctx.push_str(" ON ");
            condition.to_sql(ctx);
        }
    }
}

impl fmt::Debug for DynamicPreJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPreJoin")
            .field("join_type", &self.join_type)
            .field("rhs", &self.rhs)
            .finish()
    }
}

impl fmt::Debug for DynamicJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicJoin")
            .field("join_type", &self.join_type)
            .field("rhs", &self.rhs)
            .field("condition", &self.condition)
            .finish()
    }
}
