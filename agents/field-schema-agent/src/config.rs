//! Agent configuration
//!
//! Values are resolved in this order, later sources winning:
//! built-in defaults, the TOML file given with `--config`, environment
//! variables, command-line flags.
//!
//! ```toml
//! [validator]
//! low_confidence_threshold = 0.8
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use field_schema_core::config::LOW_CONFIDENCE_THRESHOLD_ENV;
use field_schema_core::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::output::OutputFormat;
use crate::error::{AgentError, Result};

/// Environment variable selecting the default output format
pub const OUTPUT_FORMAT_ENV: &str = "FIELD_SCHEMA_OUTPUT_FORMAT";

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Colorize table output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

/// Full agent configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub validator: ValidatorConfig,
    pub output: OutputConfig,
}

impl AgentConfig {
    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from an optional file, then overlay the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AgentError::file_error(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::debug!(path = %path.display(), "loaded agent configuration file");
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay values from a variable lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.validator.apply_overrides(&lookup)?;

        if let Some(value) = lookup(OUTPUT_FORMAT_ENV) {
            self.output.format = value.parse().map_err(AgentError::Config)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_schema_core::SchemaError;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.validator.low_confidence_threshold, 0.7);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.color);
    }

    #[test]
    fn test_parse_toml() {
        let config = AgentConfig::from_toml_str(
            r#"
[validator]
low_confidence_threshold = 0.8

[output]
format = "yaml"
"#,
        )
        .unwrap();

        assert_eq!(config.validator.low_confidence_threshold, 0.8);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.output.color);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AgentConfig::from_toml_str("[output]\nformat = \"yaml\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            (OUTPUT_FORMAT_ENV, "json"),
            (LOW_CONFIDENCE_THRESHOLD_ENV, "0.5"),
        ]
        .into_iter()
        .collect();

        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.validator.low_confidence_threshold, 0.5);
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        let mut config = AgentConfig::default();
        let err = config
            .apply_overrides(|name| (name == OUTPUT_FORMAT_ENV).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_bad_threshold_env_is_engine_config_error() {
        for value in ["abc", "5.0"] {
            let mut config = AgentConfig::default();
            let err = config
                .apply_overrides(|name| {
                    (name == LOW_CONFIDENCE_THRESHOLD_ENV).then(|| value.to_string())
                })
                .unwrap_err();
            assert!(
                matches!(err, AgentError::Engine(SchemaError::InvalidConfig(_))),
                "{value}"
            );
            assert!(err.is_user_error());
        }
    }

    #[test]
    fn test_out_of_range_file_value_is_rejected() {
        let mut config =
            AgentConfig::from_toml_str("[validator]\nlow_confidence_threshold = 2.0\n").unwrap();
        let err = config.apply_overrides(|_| None).unwrap_err();
        assert!(matches!(err, AgentError::Engine(SchemaError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_toml_is_rejected_as_config_error() {
        let err = AgentConfig::from_toml_str("[output\n").unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }
}
