// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema declaration, alias tables and hydration.

use thiserror::Error;

/// Error type returned by user-supplied setter hooks.
pub type SetterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while declaring or loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("type already registered: {0}")]
    DuplicateType(String),

    #[error("field declared twice on {type_name}: {field}")]
    DuplicateField { type_name: String, field: String },

    #[error("setter registered for undeclared field {type_name}.{field}")]
    SetterWithoutField { type_name: String, field: String },

    #[error("alias declared for undeclared field {type_name}.{field}")]
    AliasWithoutField { type_name: String, field: String },

    #[error("invalid field type `{0}`")]
    InvalidFieldType(String),

    #[error("invalid type name `{0}`")]
    InvalidTypeName(String),

    #[error("unsupported schema format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON schema error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "schema-loaders")]
    #[error("YAML schema error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Alias(#[from] AliasError),
}

/// Errors raised while building an alias table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("raw key `{raw_key}` is already claimed by field `{existing}` (rejected for `{field}`)")]
    DuplicateRawKey {
        raw_key: String,
        existing: String,
        field: String,
    },

    #[error("alias entries need a non-empty field name")]
    EmptyField,

    #[error("field `{0}` has an empty raw key")]
    EmptyRawKey(String),
}

/// Errors raised while constructing or filling a target object.
#[derive(Debug, Error)]
pub enum HydrateError {
    #[error("unknown target type: {0}")]
    UnknownType(String),

    #[error("field not declared on {type_name}: {field}")]
    UnknownField { type_name: String, field: String },

    #[error("nesting depth exceeded {max_depth} while hydrating {type_name}.{field}")]
    DepthExceeded {
        type_name: String,
        field: String,
        max_depth: usize,
    },

    #[error("setter for {type_name}.{field} failed: {source}")]
    Setter {
        type_name: String,
        field: String,
        #[source]
        source: SetterError,
    },

    #[error("typed conversion failed: {0}")]
    Typed(#[from] serde_json::Error),
}

impl HydrateError {
    /// Unwrap the error returned by a failing setter hook, if that is what
    /// this error carries.
    pub fn into_setter_error(self) -> Option<SetterError> {
        match self {
            Self::Setter { source, .. } => Some(source),
            _ => None,
        }
    }
}
