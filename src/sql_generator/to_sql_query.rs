use super::{SerializerContext, ToSql};
use crate::statement::{FromClause, FromClauseData, FromSlot, SelectStatement};

impl ToSql for FromClauseData {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        ctx.push_str(" FROM ");
        self.base().to_sql(ctx);

        // Appended joins carry their own leading keyword and whitespace,
        // so they are concatenated without a separator.
        for table in self.dynamic_tables() {
            table.to_sql(ctx);
        }

        log::trace!(
            "rendered FROM with {} appended join(s): {}",
            self.dynamic_tables().len(),
            ctx.as_str()
        );
    }
}

impl ToSql for FromClause {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        self.data().to_sql(ctx)
    }
}

impl ToSql for SelectStatement {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        ctx.push_str("SELECT ");
        if self.selected_columns().is_empty() {
            ctx.push('*');
        }
        for (i, column) in self.selected_columns().iter().enumerate() {
            if i > 0 {
                ctx.push_str(", ");
            }
            column.to_sql(ctx);
        }

        if let FromSlot::From(from) = self.from_slot() {
            from.to_sql(ctx);
        }

        if let Some(condition) = self.where_condition() {
            ctx.push_str(" WHERE ");
            condition.to_sql(ctx);
        }
    }
}
