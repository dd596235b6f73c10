//! SQL text generation
//!
//! Every renderable value implements [`ToSql`] and appends its text to a
//! [`SerializerContext`], which carries the output buffer and the [`Dialect`]
//! the statement is rendered for.

mod dialect;
mod dialect_registry;
mod to_sql_query;

pub use dialect::{Dialect, DialectContext, SqlFeature};
pub use dialect_registry::{get_dialect_preset, preset_names};

/// Output sink for SQL rendering.
#[derive(Debug, Clone)]
pub struct SerializerContext {
    dialect: Dialect,
    sql: String,
}

impl SerializerContext {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn push_str(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Text rendered so far
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

pub trait ToSql {
    fn to_sql(&self, ctx: &mut SerializerContext);

    /// Render into a fresh context for `dialect` and return the text.
    fn to_sql_string(&self, dialect: &Dialect) -> String {
        let mut ctx = SerializerContext::new(dialect.clone());
        self.to_sql(&mut ctx);
        ctx.into_sql()
    }
}

impl<T: ToSql + ?Sized> ToSql for std::sync::Arc<T> {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        (**self).to_sql(ctx)
    }
}
