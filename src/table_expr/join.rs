use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::{unresolved_tables, Expr, JoinType, TableExpression};
use crate::sql_generator::{SerializerContext, SqlFeature, ToSql};

/// A join whose condition has not been given yet.
///
/// Not a valid FROM operand until completed with [`PreJoin::on`] or
/// [`PreJoin::unconditionally`].
#[derive(Clone)]
pub struct PreJoin {
    join_type: JoinType,
    lhs: Arc<dyn TableExpression>,
    rhs: Arc<dyn TableExpression>,
}

/// A complete join of two table expressions.
#[derive(Clone)]
pub struct Join {
    join_type: JoinType,
    lhs: Arc<dyn TableExpression>,
    rhs: Arc<dyn TableExpression>,
    condition: Option<Expr>,
}

fn pre_join<L, R>(join_type: JoinType, lhs: L, rhs: R) -> PreJoin
where
    L: TableExpression + 'static,
    R: TableExpression + 'static,
{
    PreJoin::new(join_type, Arc::new(lhs), Arc::new(rhs))
}

pub fn join<L: TableExpression + 'static, R: TableExpression + 'static>(lhs: L, rhs: R) -> PreJoin {
    pre_join(JoinType::Join, lhs, rhs)
}

pub fn inner_join<L: TableExpression + 'static, R: TableExpression + 'static>(
    lhs: L,
    rhs: R,
) -> PreJoin {
    pre_join(JoinType::Inner, lhs, rhs)
}

pub fn left_outer_join<L: TableExpression + 'static, R: TableExpression + 'static>(
    lhs: L,
    rhs: R,
) -> PreJoin {
    pre_join(JoinType::Left, lhs, rhs)
}

pub fn right_outer_join<L: TableExpression + 'static, R: TableExpression + 'static>(
    lhs: L,
    rhs: R,
) -> PreJoin {
    pre_join(JoinType::Right, lhs, rhs)
}

pub fn full_outer_join<L: TableExpression + 'static, R: TableExpression + 'static>(
    lhs: L,
    rhs: R,
) -> PreJoin {
    pre_join(JoinType::Full, lhs, rhs)
}

pub fn cross_join<L: TableExpression + 'static, R: TableExpression + 'static>(
    lhs: L,
    rhs: R,
) -> PreJoin {
    pre_join(JoinType::Cross, lhs, rhs)
}

impl PreJoin {
    pub fn new(
        join_type: JoinType,
        lhs: Arc<dyn TableExpression>,
        rhs: Arc<dyn TableExpression>,
    ) -> Self {
        Self {
            join_type,
            lhs,
            rhs,
        }
    }

    pub fn on(self, condition: Expr) -> Join {
        Join {
            join_type: self.join_type,
            lhs: self.lhs,
            rhs: self.rhs,
            condition: Some(condition),
        }
    }

    pub fn unconditionally(self) -> Join {
        Join {
            join_type: self.join_type,
            lhs: self.lhs,
            rhs: self.rhs,
            condition: None,
        }
    }
}

impl Join {
    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn condition(&self) -> Option<&Expr> {
        self.condition.as_ref()
    }
}

fn joined_provided(lhs: &dyn TableExpression, rhs: &dyn TableExpression) -> Vec<String> {
    let mut provided = lhs.provided_tables();
    provided.extend(rhs.provided_tables());
    provided
}

fn joined_features(
    join_type: JoinType,
    lhs: &dyn TableExpression,
    rhs: &dyn TableExpression,
) -> Vec<SqlFeature> {
    let mut features = lhs.required_features();
    features.extend(rhs.required_features());
    features.push(SqlFeature::Join(join_type));
    features
}

impl TableExpression for PreJoin {
    fn is_table(&self) -> bool {
        false
    }

    fn is_pre_join(&self) -> bool {
        true
    }

    fn provided_tables(&self) -> Vec<String> {
        joined_provided(self.lhs.as_ref(), self.rhs.as_ref())
    }

    fn required_tables(&self) -> BTreeSet<String> {
        let provided = self.provided_tables();
        let referenced = self
            .lhs
            .required_tables()
            .into_iter()
            .chain(self.rhs.required_tables());
        unresolved_tables(referenced, &provided)
    }

    fn required_features(&self) -> Vec<SqlFeature> {
        joined_features(self.join_type, self.lhs.as_ref(), self.rhs.as_ref())
    }
}

impl TableExpression for Join {
    fn is_table(&self) -> bool {
        true
    }

    fn provided_tables(&self) -> Vec<String> {
        joined_provided(self.lhs.as_ref(), self.rhs.as_ref())
    }

    fn required_tables(&self) -> BTreeSet<String> {
        let provided = self.provided_tables();
        let referenced = self
            .lhs
            .required_tables()
            .into_iter()
            .chain(self.rhs.required_tables())
            .chain(
                self.condition
                    .iter()
                    .flat_map(|condition| condition.referenced_tables()),
            );
        unresolved_tables(referenced, &provided)
    }

    fn required_features(&self) -> Vec<SqlFeature> {
        joined_features(self.join_type, self.lhs.as_ref(), self.rhs.as_ref())
    }
}

impl ToSql for PreJoin {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        self.lhs.to_sql(ctx);
        ctx.push(' ');
        ctx.push_str(self.join_type.keyword());
        ctx.push(' ');
        self.rhs.to_sql(ctx);
    }
}

impl ToSql for Join {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        self.lhs.to_sql(ctx);
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

impl fmt::Debug for PreJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreJoin")
            .field("join_type", &self.join_type)
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .finish()
    }
}

impl fmt::Debug for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join")
            .field("join_type", &self.join_type)
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .field("condition", &self.condition)
            .finish()
    }
}
