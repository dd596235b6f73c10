/// Built-in dialect presets
///
/// Maps a dialect name to the capabilities the FROM clause renderer checks
/// before accepting a dynamically added join.
use std::collections::HashMap;

use super::dialect::{Dialect, SqlFeature};
use crate::table_expr::JoinType;

/// Get the preset for a dialect name (case-insensitive)
pub fn get_dialect_preset(name: &str) -> Option<Dialect> {
    let name_lower = name.to_lowercase();
    DIALECT_PRESETS.get(name_lower.as_str()).cloned()
}

/// Names of all registered presets, sorted
pub fn preset_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DIALECT_PRESETS.keys().copied().collect();
    names.sort_unstable();
    names
}

lazy_static::lazy_static! {
    static ref DIALECT_PRESETS: HashMap<&'static str, Dialect> = {
        let mut m = HashMap::new();

        m.insert("generic", Dialect::generic());

        // SQLite before 3.39 has neither RIGHT nor FULL OUTER JOIN
        m.insert(
            "sqlite",
            Dialect::new("sqlite")
                .without_feature(SqlFeature::Join(JoinType::Right))
                .without_feature(SqlFeature::Join(JoinType::Full)),
        );

        m.insert("postgres", Dialect::new("postgres"));

        // MySQL has no FULL OUTER JOIN
        m.insert(
            "mysql",
            Dialect::new("mysql").without_feature(SqlFeature::Join(JoinType::Full)),
        );

        m.insert("clickhouse", Dialect::new("clickhouse"));

        m
    };
}
