use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::sql_generator::{get_dialect_preset, preset_names, Dialect, SqlFeature};
use crate::table_expr::JoinType;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Dialect configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Name reported in diagnostics
    #[validate(length(min = 1, max = 64, message = "Dialect name must be 1 to 64 characters"))]
    pub name: String,

    /// Built-in preset the dialect starts from
    #[validate(custom(function = "validate_preset"))]
    #[serde(default)]
    pub preset: Option<String>,

    /// Whether statements may use dynamic FROM clauses
    #[serde(default = "default_dynamic_from")]
    pub dynamic_from: bool,

    /// Join types the target database cannot execute
    #[serde(default)]
    pub disabled_joins: Vec<JoinType>,
}

fn default_dynamic_from() -> bool {
    true
}

fn validate_preset(preset: &str) -> Result<(), ValidationError> {
    if get_dialect_preset(preset).is_none() {
        return Err(ValidationError::new("unknown_dialect_preset").with_message(
            format!("expected one of: {}", preset_names().join(", ")).into(),
        ));
    }
    Ok(())
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            name: "generic".to_string(),
            preset: None,
            dynamic_from: true,
            disabled_joins: Vec::new(),
        }
    }
}

impl DialectConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let preset = env::var("QUERYKIT_DIALECT").ok();
        let config = Self {
            name: preset.clone().unwrap_or_else(|| "generic".to_string()),
            preset,
            dynamic_from: parse_env_var("QUERYKIT_DYNAMIC_FROM", "true")?,
            disabled_joins: parse_join_list(
                "QUERYKIT_DISABLED_JOINS",
                &env::var("QUERYKIT_DISABLED_JOINS").unwrap_or_default(),
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Configuration for a built-in preset
    pub fn for_preset(preset: &str) -> Result<Self, ConfigError> {
        let config = Self {
            name: preset.to_lowercase(),
            preset: Some(preset.to_string()),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn into_dialect(self) -> Result<Dialect, ConfigError> {
        self.validate()?;
        let base = self
            .preset
            .as_deref()
            .and_then(get_dialect_preset)
            .unwrap_or_else(|| Dialect::new(self.name.as_str()));

        let dialect = self.disabled_joins.iter().fold(
            base.with_name(self.name.as_str())
                .with_dynamic_from(self.dynamic_from),
            |dialect, join_type| dialect.without_feature(SqlFeature::Join(*join_type)),
        );
        Ok(dialect)
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

/// Parse a comma-separated list of join types
fn parse_join_list(field: &str, value: &str) -> Result<Vec<JoinType>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<JoinType>().map_err(|e| ConfigError::Parse {
                field: field.to_string(),
                value: value.to_string(),
                source: e.into(),
            })
        })
        .collect()
}
