//! Query descriptions loaded from files and rendered end to end

#[cfg(test)]
mod query_spec_tests {
    use querykit::config::DialectConfig;
    use querykit::query_spec::{QuerySpec, QuerySpecError};
    use querykit::{BuildError, DialectContext, StatementError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn context_for(preset: &str) -> DialectContext {
        let dialect = DialectConfig::for_preset(preset)
            .unwrap()
            .into_dialect()
            .unwrap();
        DialectContext::bound(dialect)
    }

    const DYNAMIC_ORDERS: &str = r#"
dialect: postgres
dynamic: true
select: [orders.id, customers.name, r.amount]
from:
  table: orders
where:
  - { left: customers.active, value: true }
add:
  - table: { table: customers }
    on:
      - { left: orders.id, column: customers.order_id }
  - type: left
    table: { table: refunds, alias: r }
    on:
      - { left: orders.id, column: r.order_id }
"#;

    #[test]
    fn test_yaml_file_renders_dynamic_query() {
        let file = write_temp(".yaml", DYNAMIC_ORDERS);
        let spec = QuerySpec::from_file(file.path()).unwrap();
        assert_eq!(spec.dialect.as_deref(), Some("postgres"));

        let stmt = spec.build(context_for("postgres")).unwrap();
        assert_eq!(
            stmt.to_sql_string().unwrap(),
            "SELECT orders.id, customers.name, r.amount FROM orders \
             JOIN customers ON orders.id = customers.order_id \
             LEFT OUTER JOIN refunds AS r ON orders.id = r.order_id \
             WHERE customers.active = TRUE"
        );
    }

    #[test]
    fn test_json_file_with_join_base() {
        let json = r#"{
            "select": ["o.id", "c.name"],
            "from": {
                "join": {
                    "type": "inner",
                    "left": {"table": "orders", "alias": "o"},
                    "right": {"table": "customers", "alias": "c"},
                    "on": [{"left": "o.customer_id", "column": "c.id"}]
                }
            }
        }"#;
        let file = write_temp(".json", json);
        let spec = QuerySpec::from_file(file.path()).unwrap();
        let stmt = spec.build(DialectContext::Unbound).unwrap();
        assert_eq!(
            stmt.to_sql_string().unwrap(),
            "SELECT o.id, c.name FROM orders AS o INNER JOIN customers AS c ON o.customer_id = c.id"
        );
    }

    #[test]
    fn test_dialect_rejects_appended_join() {
        let yaml = r#"
dynamic: true
from: { table: orders }
add:
  - type: full
    table: { table: customers }
    on:
      - { left: orders.id, column: customers.order_id }
"#;
        let spec = QuerySpec::from_yaml_str(yaml).unwrap();
        let err = spec.build(context_for("mysql")).unwrap_err();
        assert!(matches!(
            err,
            QuerySpecError::Statement(StatementError::Build(
                BuildError::UnserializableForDialect { .. }
            ))
        ));
    }

    #[test]
    fn test_duplicate_add_fails_whole_build() {
        let yaml = r#"
dynamic: true
from: { table: orders }
add:
  - table: { table: customers }
    unconditional: true
  - table: { table: orders }
    unconditional: true
"#;
        let spec = QuerySpec::from_yaml_str(yaml).unwrap();
        let err = spec.build(context_for("generic")).unwrap_err();
        assert!(matches!(
            err,
            QuerySpecError::Statement(StatementError::Build(BuildError::DuplicateTableNameOnAdd(ref name)))
                if name == "orders"
        ));
    }

    #[test]
    fn test_add_with_pre_join_table_fails_build() {
        let yaml = r#"
dynamic: true
from: { table: orders }
add:
  - table:
      join:
        left: { table: customers }
        right: { table: regions }
    on:
      - { left: orders.customer_id, column: customers.id }
"#;
        let spec = QuerySpec::from_yaml_str(yaml).unwrap();
        let err = spec.build(context_for("generic")).unwrap_err();
        assert!(matches!(
            err,
            QuerySpecError::Statement(StatementError::Build(BuildError::NotAJoinExpression))
        ));
    }

    #[test]
    fn test_unknown_column_table_is_caught_at_render() {
        let yaml = r#"
select: [orders.id, customers.name]
from: { table: orders }
"#;
        let spec = QuerySpec::from_yaml_str(yaml).unwrap();
        let stmt = spec.build(DialectContext::Unbound).unwrap();
        assert_eq!(
            stmt.to_sql_string().unwrap_err(),
            StatementError::UnknownTable("customers".to_string())
        );
    }

    #[test]
    fn test_missing_file() {
        let err = QuerySpec::from_file("/nonexistent/query.yaml").unwrap_err();
        assert!(matches!(err, QuerySpecError::Io(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = QuerySpec::from_yaml_str("select: [orders.id]\n").unwrap_err();
        assert!(matches!(err, QuerySpecError::Yaml(_)));
    }
}
