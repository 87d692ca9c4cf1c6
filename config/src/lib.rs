//! # Configuration Management for FilterHaus
//!
//! This crate provides the configuration structures selecting and tuning the
//! SQL dialect used to translate filters.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DialectProfile, DialectSettings};
//!
//! let settings = DialectSettings::new(DialectProfile::Postgres)
//!     .with_operator("_is_distinct_from", "IS DISTINCT FROM")
//!     .with_aggregate_function("median", "MEDIAN");
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [dialect]
//! profile = "postgres"
//! name_delimiter = "\""
//!
//! [dialect.operators]
//! _is_distinct_from = "IS DISTINCT FROM"
//!
//! [dialect.aggregate_functions]
//! median = "MEDIAN"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from filterhaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./filterhaus.toml";
const CONFIG_PATH_ENV: &str = "FILTERHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dialect: DialectSettings,
}

/// Built-in dialect tables to start from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectProfile {
    #[default]
    Ansi,
    Postgres,
}

/// Dialect configuration
///
/// `operators` and `aggregate_functions` are merged on top of the
/// profile's own tables, replacing entries with the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectSettings {
    #[serde(default)]
    pub profile: DialectProfile,
    #[serde(default = "default_name_delimiter")]
    pub name_delimiter: String,
    #[serde(default)]
    pub operators: BTreeMap<String, String>,
    #[serde(default)]
    pub aggregate_functions: BTreeMap<String, String>,
}

fn default_name_delimiter() -> String {
    "\"".to_string()
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self::new(DialectProfile::default())
    }
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variable may come from the environment
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.dialect.validate()
    }
}

impl DialectSettings {
    /// Create settings for a profile with no overrides
    pub fn new(profile: DialectProfile) -> Self {
        Self {
            profile,
            name_delimiter: default_name_delimiter(),
            operators: BTreeMap::new(),
            aggregate_functions: BTreeMap::new(),
        }
    }

    pub fn with_name_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.name_delimiter = delimiter.into();
        self
    }

    /// Add or replace a Hasura operator mapping
    pub fn with_operator(mut self, operator: impl Into<String>, sql: impl Into<String>) -> Self {
        self.operators.insert(operator.into(), sql.into());
        self
    }

    /// Add or replace an aggregate function mapping
    pub fn with_aggregate_function(
        mut self,
        function: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        self.aggregate_functions.insert(function.into(), sql.into());
        self
    }

    /// Validate dialect values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_delimiter.is_empty() {
            return Err(ConfigError::Invalid(
                "Dialect name_delimiter cannot be empty".to_string(),
            ));
        }

        for (operator, sql) in &self.operators {
            if !operator.starts_with('_') {
                return Err(ConfigError::Invalid(format!(
                    "Operator '{}' must start with an underscore",
                    operator
                )));
            }
            if sql.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Operator '{}' must map to a SQL operator",
                    operator
                )));
            }
        }

        for (function, sql) in &self.aggregate_functions {
            if function.trim().is_empty() || sql.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Aggregate function '{}' must map to a SQL function",
                    function
                )));
            }
        }

        Ok(())
    }
}
