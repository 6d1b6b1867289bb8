// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter configuration (TOML).

use dtokit::HydrateOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Log filter (`warn`, `dtokit=trace`, ...).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Schema document used when `--schema` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Overrides the options declared by the schema document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrate: Option<HydrateOptions>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            schema: None,
            pretty: true,
            hydrate: None,
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(ConfigError::Invalid(format!(
                "log_level `{}`: {}",
                self.log_level, e
            )));
        }
        if let Some(options) = &self.hydrate {
            if options.max_depth == 0 {
                return Err(ConfigError::Invalid(
                    "hydrate.max_depth must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }

    /// Example written by `gen-config`.
    pub fn example() -> Self {
        Self {
            log_level: "info".into(),
            schema: Some(PathBuf::from("schema.yaml")),
            pretty: true,
            hydrate: Some(HydrateOptions::default().max_depth(32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtokit::DefaultsPass;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: ConvertConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.log_level, "warn");
        assert!(config.pretty);
        config.validate().unwrap();
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "dtokit=trace"
schema = "types.json"
pretty = false

[hydrate]
max_depth = 8
defaults_pass = "skip-setters"
"#
        )
        .unwrap();

        let config = ConvertConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schema, Some(PathBuf::from("types.json")));
        assert!(!config.pretty);
        let options = config.hydrate.unwrap();
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.defaults_pass, DefaultsPass::SkipSetters);
    }

    #[test]
    fn test_validation() {
        let config = ConvertConfig {
            hydrate: Some(HydrateOptions::default().max_depth(0)),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ConvertConfig {
            log_level: "dtokit=loud".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_roundtrip() {
        let example = ConvertConfig::example();
        let toml_str = toml::to_string_pretty(&example).expect("serialize");
        assert!(toml_str.contains("[hydrate]"));
        assert!(toml_str.contains("max_depth = 32"));
        assert!(toml_str.contains("defaults_pass = \"every-fill\""));

        let parsed: ConvertConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, example);
    }
}
