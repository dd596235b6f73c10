//! Static FROM clause construction through the public API
//!
//! Covers the four base-table checks, their ordering, and rendering of a
//! clause that holds only its base expression.

#[cfg(test)]
mod from_clause_tests {
    use querykit::statement::NoFromClause;
    use querykit::table_expr::{
        col, cross_join, dynamic_join, full_outer_join, inner_join, join, left_outer_join, table,
    };
    use querykit::{BuildError, Dialect, TableExpression, ToSql};
    use test_case::test_case;

    fn render(clause: &impl ToSql) -> String {
        clause.to_sql_string(&Dialect::generic())
    }

    #[test_case(table("orders"), " FROM orders" ; "plain table")]
    #[test_case(table("orders").alias("o"), " FROM orders AS o" ; "aliased table")]
    #[test_case(table("orders").in_schema("shop"), " FROM shop.orders" ; "schema qualified")]
    fn test_valid_base_renders_after_from(base: querykit::Table, expected: &str) {
        let clause = NoFromClause.from(base).unwrap();
        assert_eq!(render(&clause), expected);
    }

    #[test]
    fn test_orders_scenario() {
        let orders = table("orders");
        assert_eq!(orders.provided_tables(), vec!["orders"]);
        assert!(orders.required_tables().is_empty());

        let clause = NoFromClause.from(orders).unwrap();
        assert_eq!(render(&clause), " FROM orders");
    }

    #[test]
    fn test_static_render_equals_base_render() {
        let base = inner_join(table("orders"), table("customers"))
            .on(col("orders.customer_id").eq(col("customers.id")));
        let expected = format!(" FROM {}", render(&base));

        let clause = NoFromClause.from(base).unwrap();
        assert!(clause.data().dynamic_tables().is_empty());
        assert_eq!(render(&clause), expected);
    }

    #[test]
    fn test_pre_join_base() {
        let err = NoFromClause
            .from(left_outer_join(table("orders"), table("customers")))
            .unwrap_err();
        assert_eq!(err, BuildError::NotAPreJoin);
    }

    #[test]
    fn test_dynamic_join_is_not_a_table_expression() {
        let err = NoFromClause
            .from(dynamic_join(table("customers")).unconditionally())
            .unwrap_err();
        assert_eq!(err, BuildError::NotATableExpression);
    }

    #[test]
    fn test_unresolved_dependency_never_succeeds() {
        let correlated = [
            join(table("orders"), table("customers"))
                .on(col("customers.region_id").eq(col("regions.id"))),
            cross_join(table("orders"), table("customers"))
                .on(col("orders.id").eq(col("refunds.order_id"))),
            full_outer_join(table("a"), table("b"))
                .on(col("a.id").eq(col("outer_query.a_id")).and(col("b.id").eq(col("a.b_id")))),
        ];

        for base in correlated {
            let missing: Vec<String> = base.required_tables().into_iter().collect();
            assert!(!missing.is_empty());
            assert_eq!(
                NoFromClause.from(base).unwrap_err(),
                BuildError::UnresolvedDependency(missing)
            );
        }
    }

    #[test]
    fn test_duplicate_table_name_in_base() {
        let self_join = join(table("orders"), table("orders"))
            .on(col("orders.id").eq(col("orders.parent_id")));
        assert_eq!(
            NoFromClause.from(self_join).unwrap_err(),
            BuildError::DuplicateTableName("orders".to_string())
        );
    }

    #[test]
    fn test_aliases_resolve_duplicate_names() {
        let self_join = join(table("orders").alias("child"), table("orders").alias("parent"))
            .on(col("child.parent_id").eq(col("parent.id")));
        let clause = NoFromClause.from(self_join).unwrap();
        assert_eq!(clause.provided_tables(), vec!["child", "parent"]);
        assert_eq!(
            render(&clause),
            " FROM orders AS child JOIN orders AS parent ON child.parent_id = parent.id"
        );
    }

    #[test]
    fn test_dependency_reported_before_duplicate() {
        // Both checks fail; the dependency check runs first.
        let base = join(table("orders"), table("orders"))
            .on(col("orders.id").eq(col("ghosts.id")));
        assert_eq!(
            NoFromClause.from(base).unwrap_err(),
            BuildError::UnresolvedDependency(vec!["ghosts".to_string()])
        );
    }

    #[test]
    fn test_add_on_static_clause_fails_for_any_argument() {
        let mut clause = NoFromClause.from(table("orders")).unwrap();

        let valid = dynamic_join(table("customers"))
            .on(col("orders.customer_id").eq(col("customers.id")));
        assert_eq!(clause.add(valid).unwrap_err(), BuildError::NotDynamic);
        assert_eq!(clause.add(table("customers")).unwrap_err(), BuildError::NotDynamic);
        assert_eq!(
            clause
                .add(dynamic_join(table("orders")).unconditionally())
                .unwrap_err(),
            BuildError::NotDynamic
        );
        assert_eq!(render(&clause), " FROM orders");
    }
}
