//! Golden output for FROM rendering
//!
//! The clause writes " FROM ", then the base, then every appended join with
//! no separator of its own. Appended joins start with their own whitespace
//! and keyword, so plain concatenation is the contract pinned here.

#[cfg(test)]
mod render_golden_tests {
    use querykit::statement::NoFromClause;
    use querykit::table_expr::{
        col, dynamic_cross_join, dynamic_inner_join, dynamic_join, dynamic_left_outer_join, lit,
        table,
    };
    use querykit::{dynamic_from, Dialect, DialectContext, SerializerContext, ToSql};

    #[test]
    fn test_golden_concatenation() {
        let ctx = DialectContext::bound(Dialect::generic());
        let mut clause = NoFromClause.dynamic_from(&ctx, table("orders")).unwrap();

        let a = dynamic_join(table("customers")).on(col("orders.customer_id").eq(col("customers.id")));
        let b = dynamic_left_outer_join(table("refunds").alias("r"))
            .on(col("orders.id").eq(col("r.order_id")).and(col("r.amount").gt(lit(0))));
        let c = dynamic_cross_join(table("calendar")).unconditionally();

        let expected = format!(
            " FROM {}{}{}{}",
            table("orders").to_sql_string(&Dialect::generic()),
            a.to_sql_string(&Dialect::generic()),
            b.to_sql_string(&Dialect::generic()),
            c.to_sql_string(&Dialect::generic()),
        );

        clause.add(a).unwrap();
        clause.add(b).unwrap();
        clause.add(c).unwrap();

        let sql = clause.to_sql_string(&Dialect::generic());
        assert_eq!(sql, expected);
        assert_eq!(
            sql,
            " FROM orders JOIN customers ON orders.customer_id = customers.id \
             LEFT OUTER JOIN refunds AS r ON orders.id = r.order_id AND r.amount > 0 \
             CROSS JOIN calendar"
        );
    }

    #[test]
    fn test_order_follows_append_order() {
        let ctx = DialectContext::bound(Dialect::generic());

        let mut ab = NoFromClause.dynamic_from(&ctx, table("t")).unwrap();
        ab.add(dynamic_join(table("a")).unconditionally()).unwrap();
        ab.add(dynamic_join(table("b")).unconditionally()).unwrap();

        let mut ba = NoFromClause.dynamic_from(&ctx, table("t")).unwrap();
        ba.add(dynamic_join(table("b")).unconditionally()).unwrap();
        ba.add(dynamic_join(table("a")).unconditionally()).unwrap();

        assert_eq!(ab.to_sql_string(&Dialect::generic()), " FROM t JOIN a JOIN b");
        assert_eq!(ba.to_sql_string(&Dialect::generic()), " FROM t JOIN b JOIN a");
    }

    #[test]
    fn test_render_appends_to_existing_sink() {
        let clause = NoFromClause.from(table("orders")).unwrap();
        let mut sink = SerializerContext::new(Dialect::generic());
        sink.push_str("SELECT orders.id");
        clause.to_sql(&mut sink);
        assert_eq!(sink.into_sql(), "SELECT orders.id FROM orders");
    }

    #[test]
    fn test_full_statement() {
        let mut stmt = dynamic_from(DialectContext::bound(Dialect::generic()), table("orders"))
            .unwrap()
            .columns(vec![col("orders.id"), col("c.name")]);
        stmt.add(dynamic_inner_join(table("customers").alias("c")).on(col("orders.customer_id").eq(col("c.id"))))
            .unwrap();

        assert_eq!(
            stmt.to_sql_string().unwrap(),
            "SELECT orders.id, c.name FROM orders INNER JOIN customers AS c ON orders.customer_id = c.id"
        );
    }
}
