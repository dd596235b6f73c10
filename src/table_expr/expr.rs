use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::sql_generator::{SerializerContext, ToSql};

/// Value expressions used in ON conditions, select lists and WHERE.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Literal),
    OperatorApplicationExp(OperatorApplication),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
}

/// `table.column`, or a bare column name when `table` is `None`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    And,
    Or,
    Not,
    IsNull,
    IsNotNull,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OperatorApplication {
    pub operator: Operator,
    pub operands: Vec<Expr>,
}

/// Column reference from `"table.column"` or `"column"`.
pub fn col(reference: &str) -> Expr {
    let column_ref = match reference.split_once('.') {
        Some((table, column)) => ColumnRef {
            table: Some(table.to_string()),
            column: column.to_string(),
        },
        None => ColumnRef {
            table: None,
            column: reference.to_string(),
        },
    };
    Expr::Column(column_ref)
}

pub fn lit(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl Expr {
    fn apply(operator: Operator, operands: Vec<Expr>) -> Expr {
        Expr::OperatorApplicationExp(OperatorApplication { operator, operands })
    }

    pub fn eq(self, other: Expr) -> Expr {
        Self::apply(Operator::Equal, vec![self, other])
    }

    pub fn ne(self, other: Expr) -> Expr {
        Self::apply(Operator::NotEqual, vec![self, other])
    }

    pub fn lt(self, other: Expr) -> Expr {
        Self::apply(Operator::LessThan, vec![self, other])
    }

    pub fn gt(self, other: Expr) -> Expr {
        Self::apply(Operator::GreaterThan, vec![self, other])
    }

    pub fn le(self, other: Expr) -> Expr {
        Self::apply(Operator::LessThanEqual, vec![self, other])
    }

    pub fn ge(self, other: Expr) -> Expr {
        Self::apply(Operator::GreaterThanEqual, vec![self, other])
    }

    pub fn and(self, other: Expr) -> Expr {
        Self::apply(Operator::And, vec![self, other])
    }

    pub fn or(self, other: Expr) -> Expr {
        Self::apply(Operator::Or, vec![self, other])
    }

    pub fn not(self) -> Expr {
        Self::apply(Operator::Not, vec![self])
    }

    pub fn is_null(self) -> Expr {
        Self::apply(Operator::IsNull, vec![self])
    }

    pub fn is_not_null(self) -> Expr {
        Self::apply(Operator::IsNotNull, vec![self])
    }

    /// Names of all tables this expression references through qualified columns.
    pub fn referenced_tables(&self) -> BTreeSet<String> {
        let mut tables = BTreeSet::new();
        self.collect_tables(&mut tables);
        tables
    }

    fn collect_tables(&self, tables: &mut BTreeSet<String>) {
        match self {
            Expr::Column(ColumnRef {
                table: Some(table), ..
            }) => {
                tables.insert(table.clone());
            }
            Expr::Column(_) | Expr::Literal(_) => {}
            Expr::OperatorApplicationExp(op) => {
                for operand in &op.operands {
                    operand.collect_tables(tables);
                }
            }
        }
    }

    fn is_logical(&self) -> bool {
        matches!(
            self,
            Expr::OperatorApplicationExp(OperatorApplication {
                operator: Operator::And | Operator::Or,
                ..
            })
        )
    }
}

impl ToSql for Literal {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        match self {
            Literal::Integer(i) => ctx.push_str(&i.to_string()),
            Literal::Float(f) => ctx.push_str(&f.to_string()),
            Literal::Boolean(b) => ctx.push_str(if *b { "TRUE" } else { "FALSE" }),
            Literal::String(s) => {
                ctx.push('\'');
                ctx.push_str(&s.replace('\'', "''"));
                ctx.push('\'');
            }
            Literal::Null => ctx.push_str("NULL"),
        }
    }
}

impl ToSql for ColumnRef {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        if let Some(table) = &self.table {
            ctx.push_str(table);
            ctx.push('.');
        }
        ctx.push_str(&self.column);
    }
}

impl ToSql for OperatorApplication {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        fn op_str(o: Operator) -> &'static str {
            match o {
                Operator::Equal => "=",
                Operator::NotEqual => "<>",
                Operator::LessThan => "<",
                Operator::GreaterThan => ">",
                Operator::LessThanEqual => "<=",
                Operator::GreaterThanEqual => ">=",
                Operator::And => "AND",
                Operator::Or => "OR",
                Operator::Not => "NOT",
                Operator::IsNull => "IS NULL",
                Operator::IsNotNull => "IS NOT NULL",
            }
        }

        let sql_op = op_str(self.operator);

        // Nested AND/OR keep their grouping
        let render_operand = |operand: &Expr, ctx: &mut SerializerContext| {
            let wrap = operand.is_logical()
                && !matches!(
                    operand,
                    Expr::OperatorApplicationExp(inner) if inner.operator == self.operator
                );
            if wrap {
                ctx.push('(');
                operand.to_sql(ctx);
                ctx.push(')');
            } else {
                operand.to_sql(ctx);
            }
        };

        match (self.operator, self.operands.as_slice()) {
            (_, []) => {}
            (Operator::IsNull | Operator::IsNotNull, [operand]) => {
                render_operand(operand, ctx);
                ctx.push(' ');
                ctx.push_str(sql_op);
            }
            (_, [operand]) => {
                ctx.push_str(sql_op);
                ctx.push(' ');
                render_operand(operand, ctx);
            }
            (_, [first, rest @ ..]) => {
                render_operand(first, ctx);
                for operand in rest {
                    ctx.push(' ');
                    ctx.push_str(sql_op);
                    ctx.push(' ');
                    render_operand(operand, ctx);
                }
            }
        }
    }
}

impl ToSql for Expr {
    fn to_sql(&self, ctx: &mut SerializerContext) {
        match self {
            Expr::Column(column) => column.to_sql(ctx),
            Expr::Literal(literal) => literal.to_sql(ctx),
            Expr::OperatorApplicationExp(op) => op.to_sql(ctx),
        }
    }
}
