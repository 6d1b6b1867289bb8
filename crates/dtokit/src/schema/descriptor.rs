// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the statically declared shape of a target type.

use crate::alias::AliasTable;
use crate::error::{SchemaError, SetterError};
use crate::object::DtoObject;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Setter hook overriding population of one field.
///
/// Receives the object being filled and the raw input value. The engine does
/// no further interpretation of the value once a setter is registered.
pub type SetterFn = Arc<dyn Fn(&mut DtoObject, &Value) -> Result<(), SetterError> + Send + Sync>;

/// Declared kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain value, assigned verbatim.
    Scalar,
    /// Field declared with a type name. Becomes a nested object when the
    /// name is a registered type, a scalar otherwise.
    Named(String),
    /// List field with an optional element-type annotation.
    List { element: Option<String> },
}

impl FieldKind {
    /// Named field kind.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self::Named(type_name.into())
    }

    /// List annotated with an element type.
    pub fn list_of(element: impl Into<String>) -> Self {
        Self::List {
            element: Some(element.into()),
        }
    }

    /// List without element annotation.
    pub fn untyped_list() -> Self {
        Self::List { element: None }
    }
}

/// Parses the declaration syntax used by schema documents:
/// `scalar`, `list`, `list<Item>`, or any other type name.
impl FromStr for FieldKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SchemaError::InvalidFieldType(s.to_string()));
        }
        if s == "scalar" {
            return Ok(Self::Scalar);
        }
        if s == "list" {
            return Ok(Self::untyped_list());
        }
        if let Some(rest) = s.strip_prefix("list<") {
            let element = rest
                .strip_suffix('>')
                .map(str::trim)
                .filter(|e| is_type_name(e))
                .ok_or_else(|| SchemaError::InvalidFieldType(s.to_string()))?;
            return Ok(Self::list_of(element));
        }
        if !is_type_name(s) {
            return Err(SchemaError::InvalidFieldType(s.to_string()));
        }
        Ok(Self::named(s))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Named(name) => write!(f, "{}", name),
            Self::List { element: None } => write!(f, "list"),
            Self::List {
                element: Some(element),
            } => write!(f, "list<{}>", element),
        }
    }
}

/// Type names are identifiers, optionally `::`-qualified.
pub(crate) fn is_type_name(name: &str) -> bool {
    !name.is_empty()
        && name.split("::").all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

/// Resolved shape of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Object(String),
    List(String),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Object(name) => write!(f, "object<{}>", name),
            Self::List(name) => write!(f, "list<{}>", name),
        }
    }
}

/// Field descriptor for target type members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name (camelCase by convention).
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
    /// Default value; `None` means null.
    pub default: Option<Value>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Set default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Value a fresh object starts with.
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }
}

/// A complete target type descriptor.
///
/// Built with [`TypeDescriptorBuilder`](crate::schema::TypeDescriptorBuilder)
/// and frozen once registered.
#[derive(Clone)]
pub struct TypeDescriptor {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) setters: HashMap<String, SetterFn>,
    pub(crate) aliases: AliasTable,
}

impl TypeDescriptor {
    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.field_index(name).map(|idx| &self.fields[idx])
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Setter registered for `field`, if any.
    pub fn setter(&self, field: &str) -> Option<&SetterFn> {
        self.setters.get(field)
    }

    /// Returns `true` if `field` has a setter hook.
    pub fn has_setter(&self, field: &str) -> bool {
        self.setters.contains_key(field)
    }

    /// Alias table used when none is supplied for an object of this type.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut setters: Vec<&str> = self.setters.keys().map(String::as_str).collect();
        setters.sort_unstable();
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("setters", &setters)
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_kinds() {
        assert_eq!("scalar".parse::<FieldKind>().unwrap(), FieldKind::Scalar);
        assert_eq!("list".parse::<FieldKind>().unwrap(), FieldKind::untyped_list());
        assert_eq!(
            "list<Item>".parse::<FieldKind>().unwrap(),
            FieldKind::list_of("Item")
        );
        assert_eq!(
            "list< shop::Item >".parse::<FieldKind>().unwrap(),
            FieldKind::list_of("shop::Item")
        );
        assert_eq!(
            "Address".parse::<FieldKind>().unwrap(),
            FieldKind::named("Address")
        );
        assert_eq!("string".parse::<FieldKind>().unwrap(), FieldKind::named("string"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "list<>", "list<Item", "list<a b>", "3d", "a-b", "a::"] {
            assert!(bad.parse::<FieldKind>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_field_kind_display_roundtrip() {
        for kind in [
            FieldKind::Scalar,
            FieldKind::named("Address"),
            FieldKind::untyped_list(),
            FieldKind::list_of("Item"),
        ] {
            assert_eq!(kind.to_string().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_field_defaults() {
        let plain = FieldDescriptor::new("name", FieldKind::Scalar);
        assert_eq!(plain.initial_value(), Value::Null);

        let tags = FieldDescriptor::new("tags", FieldKind::untyped_list()).with_default(json!([]));
        assert_eq!(tags.initial_value(), json!([]));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::Scalar.to_string(), "scalar");
        assert_eq!(Shape::Object("Address".into()).to_string(), "object<Address>");
        assert_eq!(Shape::List("Item".into()).to_string(), "list<Item>");
    }
}
