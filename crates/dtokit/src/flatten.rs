// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Flattening hydrated graphs back into plain data.

use crate::object::DtoObject;
use crate::value::FieldValue;
use serde_json::{Map, Value};

impl DtoObject {
    /// Plain nested form of the object: declared fields in declaration
    /// order, nested objects and typed lists flattened recursively.
    pub fn to_flat_data(&self) -> Value {
        let mut map = Map::with_capacity(self.values.len());
        for (field, value) in self.fields() {
            map.insert(field.name.clone(), value.to_flat_value());
        }
        Value::Object(map)
    }
}

impl FieldValue {
    /// Plain form of one field value.
    pub fn to_flat_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Object(obj) => obj.to_flat_data(),
            Self::List(items) => Value::Array(items.iter().map(DtoObject::to_flat_data).collect()),
        }
    }
}
