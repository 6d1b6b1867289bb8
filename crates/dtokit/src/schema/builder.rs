// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::alias::AliasTable;
use crate::error::{SchemaError, SetterError};
use crate::object::DtoObject;
use crate::schema::descriptor::is_type_name;
use crate::schema::{FieldDescriptor, FieldKind, SetterFn, TypeDescriptor};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for creating TypeDescriptor instances.
///
/// Declaration mistakes (duplicate fields, hooks or aliases naming
/// undeclared fields, conflicting aliases) are reported by [`build`](Self::build).
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    setters: Vec<(String, SetterFn)>,
    renames: Vec<(String, String)>,
    aliases: AliasTable,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a target type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            setters: Vec::new(),
            renames: Vec::new(),
            aliases: AliasTable::new(),
        }
    }

    /// Add a field descriptor.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a scalar field.
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Scalar))
    }

    /// Add a scalar field with a default value.
    pub fn scalar_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Scalar).with_default(default))
    }

    /// Add a field declared with a type name.
    ///
    /// Registered type names make it a nested object field; anything else
    /// (`string`, `int`, ...) leaves it scalar.
    pub fn typed(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::named(type_name)))
    }

    /// Add a nested object field. Same declaration as [`typed`](Self::typed).
    pub fn object(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.typed(name, type_name)
    }

    /// Add a list field annotated with its element type.
    pub fn list(self, name: impl Into<String>, element: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::list_of(element)))
    }

    /// Add a list field without element annotation.
    pub fn untyped_list(self, name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::untyped_list()))
    }

    /// Register a setter hook for `field`.
    pub fn setter<F>(mut self, field: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut DtoObject, &Value) -> Result<(), SetterError> + Send + Sync + 'static,
    {
        self.setters.push((field.into(), Arc::new(setter)));
        self
    }

    /// Rename `raw_key` onto `field` for objects of this type.
    pub fn alias(mut self, field: impl Into<String>, raw_key: impl Into<String>) -> Self {
        self.renames.push((field.into(), raw_key.into()));
        self
    }

    /// Replace the type's alias table. Renames added with
    /// [`alias`](Self::alias) are applied on top of it.
    pub fn aliases(mut self, table: AliasTable) -> Self {
        self.aliases = table;
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> Result<TypeDescriptor, SchemaError> {
        if !is_type_name(&self.name) {
            return Err(SchemaError::InvalidTypeName(self.name));
        }

        let mut index = HashMap::with_capacity(self.fields.len());
        for (idx, field) in self.fields.iter().enumerate() {
            if index.insert(field.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateField {
                    type_name: self.name,
                    field: field.name.clone(),
                });
            }
        }

        let mut setters = HashMap::with_capacity(self.setters.len());
        for (field, setter) in self.setters {
            if !index.contains_key(&field) {
                return Err(SchemaError::SetterWithoutField {
                    type_name: self.name,
                    field,
                });
            }
            setters.insert(field, setter);
        }

        let mut aliases = self.aliases;
        for (field, raw_key) in self.renames {
            aliases.insert(field, raw_key)?;
        }
        if let Some(entry) = aliases.iter().find(|e| !index.contains_key(e.field())) {
            return Err(SchemaError::AliasWithoutField {
                type_name: self.name,
                field: entry.field().to_string(),
            });
        }

        Ok(TypeDescriptor {
            name: self.name,
            fields: self.fields,
            index,
            setters,
            aliases,
        })
    }
}

impl std::fmt::Debug for TypeDescriptorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptorBuilder")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("setters", &self.setters.len())
            .finish_non_exhaustive()
    }
}
