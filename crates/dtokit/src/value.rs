// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values and the emptiness test.

use crate::object::DtoObject;
use serde_json::Value;

/// Current value of one declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Untyped value, stored verbatim.
    Scalar(Value),
    /// Hydrated nested object.
    Object(Box<DtoObject>),
    /// Hydrated typed list, in input order.
    List(Vec<DtoObject>),
}

impl FieldValue {
    /// Emptiness as seen by the default-reconciliation pass.
    ///
    /// Scalars follow [`is_empty_value`]; a nested object is never empty; a
    /// typed list is empty when it has no elements.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(value) => is_empty_value(value),
            Self::Object(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }

    /// Try to get as scalar.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as nested object.
    pub fn as_object(&self) -> Option<&DtoObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Try to get as typed list.
    pub fn as_list(&self) -> Option<&[DtoObject]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Scalar(Value::Null)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<DtoObject> for FieldValue {
    fn from(obj: DtoObject) -> Self {
        Self::Object(Box::new(obj))
    }
}

impl From<Vec<DtoObject>> for FieldValue {
    fn from(items: Vec<DtoObject>) -> Self {
        Self::List(items)
    }
}

/// Returns `true` for `null`, `false`, numeric zero, `""`, `[]` and `{}`.
///
/// Used both to skip empty input offered to nested-object fields and to pick
/// the fields revisited by the default-reconciliation pass.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => {
            n.as_i64() == Some(0) || n.as_u64() == Some(0) || n.as_f64() == Some(0.0)
        }
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
