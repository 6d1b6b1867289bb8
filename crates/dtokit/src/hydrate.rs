// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Two-pass hydration of target objects from untyped input.
//!
//! Pass 1 walks the raw input in order, maps each key to a field and
//! populates it according to the field's resolved [`Shape`]. Pass 2 then
//! re-populates every field that is still empty from the object's own
//! current values, so list defaults turn into typed (empty) lists and
//! setter hooks see default values too.

use crate::error::HydrateError;
use crate::naming::{resolve_key, KeyResolution};
use crate::object::DtoObject;
use crate::options::DefaultsPass;
use crate::schema::Shape;
use crate::value::{is_empty_value, FieldValue};
use serde_json::Value;

/// Which pass a population request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Explicit,
    Defaults,
}

impl DtoObject {
    /// Populate the object from `raw`.
    ///
    /// Only mapping input is read; any other value counts as an empty
    /// mapping. Unknown and shadowed keys are ignored. Fails only when a
    /// setter hook fails or nesting exceeds the registry's `max_depth`.
    pub fn fill(&mut self, raw: &Value) -> Result<&mut Self, HydrateError> {
        match raw {
            Value::Object(map) => {
                log::trace!("[hydrate] {}: {} input keys", self.type_name(), map.len());
                for (key, value) in map {
                    self.populate_key(key, value)?;
                }
            }
            other => {
                log::trace!(
                    "[hydrate] {}: non-mapping input treated as empty ({})",
                    self.type_name(),
                    json_kind(other)
                );
            }
        }

        match self.registry.options().defaults_pass {
            DefaultsPass::Disabled => {}
            mode => self.reconcile_defaults(mode == DefaultsPass::SkipSetters)?,
        }
        Ok(self)
    }

    fn populate_key(&mut self, raw_key: &str, value: &Value) -> Result<(), HydrateError> {
        match resolve_key(raw_key, &self.aliases) {
            KeyResolution::Aliased(field) | KeyResolution::Normalized(field) => {
                self.populate(&field, value, Pass::Explicit, false)
            }
            KeyResolution::Shadowed { field, alias } => {
                log::trace!(
                    "[hydrate] {}: key `{}` shadowed, `{}` is read from `{}`",
                    self.type_name(),
                    raw_key,
                    field,
                    alias
                );
                Ok(())
            }
        }
    }

    /// Second pass: feed every empty field its own current value.
    fn reconcile_defaults(&mut self, skip_setters: bool) -> Result<(), HydrateError> {
        let snapshot: Vec<(String, Value)> = self
            .fields()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, value)| {
                let raw = match value {
                    FieldValue::Scalar(v) => v.clone(),
                    _ => Value::Array(Vec::new()),
                };
                (field.name.clone(), raw)
            })
            .collect();

        log::trace!(
            "[hydrate] {}: reconciling {} empty fields",
            self.type_name(),
            snapshot.len()
        );
        for (field, value) in &snapshot {
            self.populate(field, value, Pass::Defaults, skip_setters)?;
        }
        Ok(())
    }

    fn populate(
        &mut self,
        field: &str,
        value: &Value,
        pass: Pass,
        skip_setters: bool,
    ) -> Result<(), HydrateError> {
        let Some(idx) = self.descriptor.field_index(field) else {
            log::trace!("[hydrate] {}: ignoring unknown field `{}`", self.type_name(), field);
            return Ok(());
        };

        if let Some(setter) = self.descriptor.setter(field).cloned() {
            if skip_setters {
                return Ok(());
            }
            return setter(self, value).map_err(|source| HydrateError::Setter {
                type_name: self.type_name().to_string(),
                field: field.to_string(),
                source,
            });
        }

        match self.registry.shape_of(&self.descriptor.fields()[idx]) {
            Shape::Scalar => {
                self.values[idx] = FieldValue::Scalar(value.clone());
            }
            Shape::Object(type_name) => {
                if is_empty_value(value) {
                    log::trace!(
                        "[hydrate] {}.{}: empty input, keeping current value",
                        self.type_name(),
                        field
                    );
                    return Ok(());
                }
                if !value.is_object() {
                    log::debug!(
                        "[hydrate] {}.{}: {} given for object<{}>, assigned as scalar",
                        self.type_name(),
                        field,
                        json_kind(value),
                        type_name
                    );
                    self.values[idx] = FieldValue::Scalar(value.clone());
                    return Ok(());
                }
                let child = self.hydrate_child(&type_name, field, value)?;
                self.values[idx] = FieldValue::Object(Box::new(child));
            }
            Shape::List(type_name) => {
                let elements: Vec<&Value> = match value {
                    Value::Array(items) => items.iter().collect(),
                    Value::Object(map) => map.values().collect(),
                    other if is_empty_value(other) => Vec::new(),
                    other => {
                        log::debug!(
                            "[hydrate] {}.{}: {} given for list<{}>, assigned as scalar",
                            self.type_name(),
                            field,
                            json_kind(other),
                            type_name
                        );
                        self.values[idx] = FieldValue::Scalar(other.clone());
                        return Ok(());
                    }
                };

                // a declared list default still in the slot is kept ahead of the input
                let carried: Vec<Value> = match &self.values[idx] {
                    FieldValue::Scalar(Value::Array(existing)) => existing.clone(),
                    _ => Vec::new(),
                };
                let mut fresh = Vec::with_capacity(carried.len() + elements.len());
                for element in carried.iter().chain(elements) {
                    fresh.push(self.hydrate_child(&type_name, field, element)?);
                }
                match &mut self.values[idx] {
                    FieldValue::List(items) => items.extend(fresh),
                    slot => *slot = FieldValue::List(fresh),
                }
            }
        }

        if pass == Pass::Defaults {
            log::trace!("[hydrate] {}.{}: default re-applied", self.type_name(), field);
        }
        Ok(())
    }

    /// Build and fill a nested object for `field`.
    ///
    /// The child reads with the table scoped to `field` when the parent's
    /// table carries one, and with its type's declared aliases otherwise.
    fn hydrate_child(
        &self,
        type_name: &str,
        field: &str,
        value: &Value,
    ) -> Result<DtoObject, HydrateError> {
        let max_depth = self.registry.options().max_depth;
        let depth = self.depth + 1;
        if depth > max_depth {
            return Err(HydrateError::DepthExceeded {
                type_name: self.type_name().to_string(),
                field: field.to_string(),
                max_depth,
            });
        }

        let mut child = DtoObject::at_depth(&self.registry, type_name, depth)?;
        if let Some(scoped) = self.aliases.scoped(field) {
            child.aliases = scoped.clone();
        }
        child.fill(value)?;
        Ok(child)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasTable;
    use crate::options::HydrateOptions;
    use crate::schema::{SchemaRegistry, TypeDescriptorBuilder};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn shop(options: HydrateOptions) -> Arc<SchemaRegistry> {
        SchemaRegistry::new()
            .with_options(options)
            .with_type(
                TypeDescriptorBuilder::new("Order")
                    .scalar("id")
                    .object("customer", "Customer")
                    .list("lines", "Line")
                    .field(
                        crate::schema::FieldDescriptor::new(
                            "extras",
                            crate::schema::FieldKind::list_of("Line"),
                        )
                        .with_default(json!([])),
                    )
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .with_type(
                TypeDescriptorBuilder::new("Customer")
                    .scalar("name")
                    .scalar("vipLevel")
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .with_type(TypeDescriptorBuilder::new("Line").scalar("sku").build().unwrap())
            .unwrap()
            .into_shared()
    }

    #[test]
    fn test_scalar_assigned_verbatim() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({ "id": "42" })).unwrap();
        assert_eq!(order.value("id"), Some(&json!("42")));
    }

    #[test]
    fn test_nested_object_with_snake_keys() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order
            .fill(&json!({ "customer": { "name": "Ada", "vip_level": 3 } }))
            .unwrap();
        let customer = order.object("customer").unwrap();
        assert_eq!(customer.value("vipLevel"), Some(&json!(3)));
        assert_eq!(customer.depth(), 1);
    }

    #[test]
    fn test_object_field_degrades_on_scalar_input() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({ "customer": "Ada" })).unwrap();
        assert_eq!(order.value("customer"), Some(&json!("Ada")));
    }

    #[test]
    fn test_list_from_mapping_values() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order
            .fill(&json!({ "lines": { "b": { "sku": "B" }, "a": { "sku": "A" } } }))
            .unwrap();
        let skus: Vec<&Value> = order
            .list("lines")
            .unwrap()
            .iter()
            .filter_map(|l| l.value("sku"))
            .collect();
        // preserve_order keeps input order
        assert_eq!(skus, [&json!("B"), &json!("A")]);
    }

    #[test]
    fn test_list_non_mapping_element_is_default() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({ "lines": [7, { "sku": "A" }] })).unwrap();
        let lines = order.list("lines").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].value("sku"), Some(&Value::Null));
    }

    #[test]
    fn test_list_degrades_on_scalar_input() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({ "lines": "n/a" })).unwrap();
        assert_eq!(order.value("lines"), Some(&json!("n/a")));
    }

    #[test]
    fn test_second_fill_appends_to_list() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order
            .fill(&json!({ "lines": [{ "sku": "A" }] }))
            .unwrap()
            .fill(&json!({ "lines": [{ "sku": "B" }] }))
            .unwrap();
        assert_eq!(order.list("lines").unwrap().len(), 2);
    }

    #[test]
    fn test_list_default_kept_ahead_of_input() {
        let reg = SchemaRegistry::new()
            .with_type(
                TypeDescriptorBuilder::new("Basket")
                    .field(
                        crate::schema::FieldDescriptor::new(
                            "lines",
                            crate::schema::FieldKind::list_of("Line"),
                        )
                        .with_default(json!([{ "sku": "d" }])),
                    )
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .with_type(TypeDescriptorBuilder::new("Line").scalar("sku").build().unwrap())
            .unwrap()
            .into_shared();

        let basket =
            DtoObject::construct(&reg, "Basket", Some(&json!({ "lines": [{ "sku": "a" }] })), None)
                .unwrap();
        assert_eq!(
            basket.to_flat_data(),
            json!({ "lines": [{ "sku": "d" }, { "sku": "a" }] })
        );

        // not an empty value, so the defaults pass leaves it untouched
        let untouched = DtoObject::construct(&reg, "Basket", Some(&json!({})), None).unwrap();
        assert_eq!(untouched.value("lines"), Some(&json!([{ "sku": "d" }])));
    }

    #[test]
    fn test_defaults_pass_types_empty_lists() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({})).unwrap();
        assert_eq!(order.list("extras").map(<[DtoObject]>::len), Some(0));
        // null default is empty too, so it also becomes a typed list
        assert_eq!(order.list("lines").map(<[DtoObject]>::len), Some(0));
        // empty object input is skipped, the field keeps its null default
        assert_eq!(order.value("customer"), Some(&Value::Null));
    }

    #[test]
    fn test_defaults_pass_disabled() {
        let reg = shop(HydrateOptions::default().defaults_pass(DefaultsPass::Disabled));
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!({})).unwrap();
        assert_eq!(order.value("extras"), Some(&json!([])));
        assert!(order.list("extras").is_none());
    }

    #[test]
    fn test_non_mapping_input_is_empty_mapping() {
        let reg = shop(HydrateOptions::default());
        let mut order = DtoObject::new(&reg, "Order").unwrap();
        order.fill(&json!([1, 2, 3])).unwrap();
        assert_eq!(order.value("id"), Some(&Value::Null));
        assert!(order.list("extras").is_some());
    }

    #[test]
    fn test_scoped_alias_table_reaches_children() {
        let reg = shop(HydrateOptions::default());
        let aliases = AliasTable::new()
            .with_alias("customer", "client")
            .unwrap()
            .with_nested("customer", AliasTable::from_pairs([("name", "full_name")]).unwrap())
            .with_nested("lines", AliasTable::from_pairs([("sku", "code")]).unwrap());

        let order = DtoObject::construct(
            &reg,
            "Order",
            Some(&json!({
                "client": { "full_name": "Ada" },
                "lines": [{ "code": "X" }, { "sku": "ignored" }]
            })),
            Some(aliases),
        )
        .unwrap();

        assert_eq!(
            order.object("customer").and_then(|c| c.value("name")),
            Some(&json!("Ada"))
        );
        let lines = order.list("lines").unwrap();
        assert_eq!(lines[0].value("sku"), Some(&json!("X")));
        // `sku` is shadowed by the scoped alias
        assert_eq!(lines[1].value("sku"), Some(&Value::Null));
    }

    #[test]
    fn test_setter_counts_per_pass_mode() {
        for (mode, expected) in [
            (DefaultsPass::EveryFill, 2),
            (DefaultsPass::SkipSetters, 1),
            (DefaultsPass::Disabled, 1),
        ] {
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&calls);
            let reg = SchemaRegistry::new()
                .with_options(HydrateOptions::default().defaults_pass(mode))
                .with_type(
                    TypeDescriptorBuilder::new("Flag")
                        .scalar("on")
                        .setter("on", move |obj, value| {
                            counter.fetch_add(1, Ordering::SeqCst);
                            obj.set_value("on", value.clone())?;
                            Ok(())
                        })
                        .build()
                        .unwrap(),
                )
                .unwrap()
                .into_shared();

            let mut flag = DtoObject::new(&reg, "Flag").unwrap();
            // `false` is empty, so the defaults pass revisits it
            flag.fill(&json!({ "on": false })).unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), expected, "{:?}", mode);
        }
    }

    #[test]
    fn test_depth_limit() {
        let reg = SchemaRegistry::new()
            .with_options(HydrateOptions::default().max_depth(2))
            .with_type(
                TypeDescriptorBuilder::new("Node")
                    .scalar("label")
                    .object("next", "Node")
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .into_shared();

        let mut ok = DtoObject::new(&reg, "Node").unwrap();
        ok.fill(&json!({ "next": { "next": { "label": "c" } } })).unwrap();

        let mut too_deep = DtoObject::new(&reg, "Node").unwrap();
        let err = too_deep
            .fill(&json!({ "next": { "next": { "next": { "label": "d" } } } }))
            .unwrap_err();
        assert!(matches!(
            err,
            HydrateError::DepthExceeded { max_depth: 2, ref field, .. } if field == "next"
        ));
    }
}
