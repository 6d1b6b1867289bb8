// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw input loading (JSON or YAML, from a file or stdin).

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Input document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Guess the format from a file extension. Unknown extensions are read
    /// as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse `content` in the given format.
pub fn parse(content: &str, format: InputFormat) -> Result<Value> {
    match format {
        InputFormat::Json => serde_json::from_str(content).context("Invalid JSON input"),
        InputFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML input"),
    }
}

/// Parse `content` whose format is unknown: JSON first, then YAML.
pub fn parse_any(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            tracing::debug!("input is not JSON ({}), trying YAML", json_err);
            parse(content, InputFormat::Yaml)
        }
    }
}

/// Read a document from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse(&content, InputFormat::from_path(path))
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            parse_any(&content)
        }
    }
}
