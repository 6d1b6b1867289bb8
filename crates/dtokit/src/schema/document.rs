// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema documents: declarative type tables loaded from JSON or YAML.
//!
//! ```yaml
//! options:
//!   max_depth: 16
//! types:
//!   User:
//!     aliases:
//!       age: years_old
//!     fields:
//!       firstName: string
//!       age: { type: int, default: 0 }
//!       address: Address
//!       orders: list<Order>
//!       tags: { type: list, default: [] }
//!   Address:
//!     fields:
//!       city: string
//! ```
//!
//! Field order in the document is the declaration order of the type.
//! Setter hooks cannot be declared in a document; attach them with
//! [`SchemaDocument::into_registry_with`].

use crate::alias::AliasTable;
use crate::error::SchemaError;
use crate::options::HydrateOptions;
use crate::schema::{FieldDescriptor, FieldKind, SchemaRegistry, TypeDescriptorBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Declaration of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// Shorthand: the declared type (`scalar`, `list<Item>`, `Address`, ...).
    Type(String),
    /// Full form with an optional default.
    Detailed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        type_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
}

impl FieldSpec {
    /// Convert into a field descriptor named `name`.
    pub fn to_descriptor(&self, name: &str) -> Result<FieldDescriptor, SchemaError> {
        match self {
            Self::Type(type_name) => Ok(FieldDescriptor::new(name, type_name.parse()?)),
            Self::Detailed { type_name, default } => {
                let kind = match type_name {
                    Some(type_name) => type_name.parse()?,
                    None => FieldKind::Scalar,
                };
                let mut field = FieldDescriptor::new(name, kind);
                field.default = default.clone();
                Ok(field)
            }
        }
    }
}

/// Declaration of one type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Fields in declaration order.
    #[serde(default, with = "ordered_fields")]
    pub fields: Vec<(String, FieldSpec)>,
    /// Default alias table of the type.
    #[serde(default, skip_serializing_if = "AliasTable::is_empty")]
    pub aliases: AliasTable,
}

impl TypeSpec {
    /// Start a builder for a type named `name` from this declaration.
    pub fn to_builder(&self, name: &str) -> Result<TypeDescriptorBuilder, SchemaError> {
        let mut builder = TypeDescriptorBuilder::new(name).aliases(self.aliases.clone());
        for (field, spec) in &self.fields {
            builder = builder.field(spec.to_descriptor(field)?);
        }
        Ok(builder)
    }
}

/// A whole schema: hydration options plus type declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub options: HydrateOptions,
    #[serde(default)]
    pub types: BTreeMap<String, TypeSpec>,
}

impl SchemaDocument {
    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML document.
    #[cfg(feature = "schema-loaders")]
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a document, picking the format from the file extension
    /// (`.json`, `.yaml`, `.yml`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;
        log::debug!("[schema] loading {}", path.display());

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            #[cfg(feature = "schema-loaders")]
            "yaml" | "yml" => Self::from_yaml_str(&content),
            other => Err(SchemaError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }

    /// Build a registry from the document.
    pub fn into_registry(self) -> Result<SchemaRegistry, SchemaError> {
        self.into_registry_with(|_, builder| builder)
    }

    /// Build a registry, letting `customize` extend every type's builder
    /// (typically with setter hooks) before it is registered.
    pub fn into_registry_with<F>(self, mut customize: F) -> Result<SchemaRegistry, SchemaError>
    where
        F: FnMut(&str, TypeDescriptorBuilder) -> TypeDescriptorBuilder,
    {
        let mut registry = SchemaRegistry::new().with_options(self.options);
        for (name, spec) in &self.types {
            let builder = customize(name, spec.to_builder(name)?);
            registry.register(builder.build()?)?;
        }
        Ok(registry)
    }
}

mod ordered_fields {
    use super::FieldSpec;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub(super) fn serialize<S: Serializer>(
        fields: &[(String, FieldSpec)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, spec) in fields {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, FieldSpec)>, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Vec<(String, FieldSpec)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to field declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, FieldSpec>()? {
                    fields.push(entry);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}
