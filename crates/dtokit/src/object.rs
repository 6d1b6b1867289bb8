// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Target objects: instances of registered types.

use crate::alias::AliasTable;
use crate::error::HydrateError;
use crate::schema::{FieldDescriptor, SchemaRegistry, TypeDescriptor};
use crate::value::FieldValue;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One level of `(field, value)` pairs in declaration order.
pub type RawFields<'a> = Vec<(&'a str, &'a FieldValue)>;

/// An instance of a registered target type.
///
/// Holds one [`FieldValue`] per declared field. The alias table and nesting
/// depth are engine bookkeeping: they steer [`fill`](Self::fill) but never
/// appear in [`to_raw_fields`](Self::to_raw_fields) or
/// [`to_flat_data`](Self::to_flat_data).
#[derive(Clone)]
pub struct DtoObject {
    pub(crate) registry: Arc<SchemaRegistry>,
    pub(crate) descriptor: Arc<TypeDescriptor>,
    pub(crate) values: Vec<FieldValue>,
    pub(crate) aliases: AliasTable,
    pub(crate) depth: usize,
}

impl DtoObject {
    /// Create an object of `type_name` with every field at its default.
    ///
    /// The alias table starts as the type's declared aliases.
    pub fn new(registry: &Arc<SchemaRegistry>, type_name: &str) -> Result<Self, HydrateError> {
        Self::at_depth(registry, type_name, 0)
    }

    pub(crate) fn at_depth(
        registry: &Arc<SchemaRegistry>,
        type_name: &str,
        depth: usize,
    ) -> Result<Self, HydrateError> {
        let descriptor = registry
            .get(type_name)
            .cloned()
            .ok_or_else(|| HydrateError::UnknownType(type_name.to_string()))?;
        let values = descriptor
            .fields()
            .iter()
            .map(|f| FieldValue::Scalar(f.initial_value()))
            .collect();
        let aliases = descriptor.aliases().clone();

        Ok(Self {
            registry: Arc::clone(registry),
            descriptor,
            values,
            aliases,
            depth,
        })
    }

    /// Create an object, install `aliases` (when given) and then fill it from
    /// `input` (when given).
    pub fn construct(
        registry: &Arc<SchemaRegistry>,
        type_name: &str,
        input: Option<&Value>,
        aliases: Option<AliasTable>,
    ) -> Result<Self, HydrateError> {
        let mut obj = Self::new(registry, type_name)?;
        if let Some(aliases) = aliases {
            obj.set_alias_table(aliases);
        }
        if let Some(input) = input {
            obj.fill(input)?;
        }
        Ok(obj)
    }

    /// Replace the alias table used by subsequent fills.
    pub fn set_alias_table(&mut self, aliases: AliasTable) -> &mut Self {
        self.aliases = aliases;
        self
    }

    /// Alias table currently in effect.
    pub fn alias_table(&self) -> &AliasTable {
        &self.aliases
    }

    /// Identity accessor.
    pub fn get(&self) -> &Self {
        self
    }

    /// Identity accessor.
    pub fn all(&self) -> &Self {
        self
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Nesting depth (0 for objects created by the caller).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current value of `name`, or `None` if the field is not declared.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.descriptor
            .field_index(name)
            .map(|idx| &self.values[idx])
    }

    /// Scalar value of `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.field(name).and_then(FieldValue::as_scalar)
    }

    /// Nested object held by `name`.
    pub fn object(&self, name: &str) -> Option<&DtoObject> {
        self.field(name).and_then(FieldValue::as_object)
    }

    /// Typed list held by `name`.
    pub fn list(&self, name: &str) -> Option<&[DtoObject]> {
        self.field(name).and_then(FieldValue::as_list)
    }

    /// Mutable access to the value of `name`.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        let idx = self.descriptor.field_index(name)?;
        Some(&mut self.values[idx])
    }

    /// Overwrite a declared field.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self, HydrateError> {
        let Some(idx) = self.descriptor.field_index(name) else {
            return Err(HydrateError::UnknownField {
                type_name: self.type_name().to_string(),
                field: name.to_string(),
            });
        };
        self.values[idx] = value.into();
        Ok(self)
    }

    /// Overwrite a declared field with a scalar.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<&mut Self, HydrateError> {
        self.set_field(name, FieldValue::Scalar(value))
    }

    /// Declared fields paired with their current values, in declaration
    /// order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.descriptor.fields().iter().zip(&self.values)
    }

    /// Current fields, one level deep. Nested objects and lists are returned
    /// as they are, not flattened.
    pub fn to_raw_fields(&self) -> RawFields<'_> {
        self.fields()
            .map(|(field, value)| (field.name.as_str(), value))
            .collect()
    }
}

impl PartialEq for DtoObject {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.values == other.values
    }
}

impl fmt::Debug for DtoObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for (field, value) in self.fields() {
            out.field(&field.name, value);
        }
        out.finish()
    }
}
