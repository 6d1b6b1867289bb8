// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::SchemaError;
use crate::options::HydrateOptions;
use crate::schema::{FieldDescriptor, FieldKind, Shape, TypeDescriptor};

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Closed set of target types, keyed by type name.
///
/// Registration happens up front; the registry is then frozen behind an
/// [`Arc`] and shared by every object hydrated from it. Type names are only
/// ever resolved against this set, never taken from raw input.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
    options: HydrateOptions,
}

impl SchemaRegistry {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target type.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<(), SchemaError> {
        if self.types.contains_key(descriptor.name()) {
            return Err(SchemaError::DuplicateType(descriptor.name.clone()));
        }
        log::debug!(
            "[schema] registered {} ({} fields)",
            descriptor.name(),
            descriptor.fields().len()
        );
        self.types
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Result<Self, SchemaError> {
        self.register(descriptor)?;
        Ok(self)
    }

    /// Replace the hydration options.
    pub fn set_options(&mut self, options: HydrateOptions) {
        self.options = options;
    }

    /// Builder-style [`set_options`](Self::set_options).
    pub fn with_options(mut self, options: HydrateOptions) -> Self {
        self.options = options;
        self
    }

    /// Hydration options shared by every object of this registry.
    pub fn options(&self) -> &HydrateOptions {
        &self.options
    }

    /// Freeze the registry for sharing.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Look up a registered type.
    pub fn get(&self, type_name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(type_name)
    }

    /// Returns `true` if `type_name` is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// List all registered type names (sorted for determinism).
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve the shape of `field_name` on `type_name`.
    ///
    /// Returns `None` when the type or the field is unknown.
    pub fn resolve(&self, type_name: &str, field_name: &str) -> Option<Shape> {
        let field = self.types.get(type_name)?.field(field_name)?;
        Some(self.shape_of(field))
    }

    /// Resolve the shape of a declared field.
    ///
    /// Names that are not registered types degrade to [`Shape::Scalar`], as
    /// do list fields without element annotation.
    pub fn shape_of(&self, field: &FieldDescriptor) -> Shape {
        match &field.kind {
            FieldKind::Scalar => Shape::Scalar,
            FieldKind::Named(name) if self.contains(name) => Shape::Object(name.clone()),
            FieldKind::List {
                element: Some(element),
            } if self.contains(element) => Shape::List(element.clone()),
            FieldKind::Named(_) | FieldKind::List { .. } => Shape::Scalar,
        }
    }

    /// Resolved `(field, shape)` table of a type, in declaration order.
    pub fn shape_table(&self, type_name: &str) -> Option<Vec<(String, Shape)>> {
        let descriptor = self.types.get(type_name)?;
        Some(
            descriptor
                .fields()
                .iter()
                .map(|f| (f.name.clone(), self.shape_of(f)))
                .collect(),
        )
    }

    /// Types referenced by `type_name` through object and list fields.
    fn references(&self, type_name: &str) -> Vec<String> {
        let Some(descriptor) = self.types.get(type_name) else {
            return Vec::new();
        };
        let mut refs: Vec<String> = descriptor
            .fields()
            .iter()
            .filter_map(|f| match self.shape_of(f) {
                Shape::Object(t) | Shape::List(t) => Some(t),
                Shape::Scalar => None,
            })
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }

    /// Report self-referential type graphs.
    ///
    /// Each cycle is returned as a path starting and ending at its
    /// lexicographically smallest type, e.g. `["Node", "Node"]` or
    /// `["A", "B", "A"]`. Cycles are legal; hydration depth is bounded by
    /// [`HydrateOptions::max_depth`].
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        for root in self.type_names() {
            let mut path = vec![root.clone()];
            let mut visited = HashSet::new();
            if self.path_back_to(&root, &root, &mut path, &mut visited) {
                cycles.push(path);
            }
        }
        cycles
    }

    fn path_back_to(
        &self,
        root: &str,
        current: &str,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) -> bool {
        for next in self.references(current) {
            if next == root {
                path.push(next);
                return true;
            }
            // smaller roots already reported cycles through them
            if next.as_str() < root || !visited.insert(next.clone()) {
                continue;
            }
            path.push(next.clone());
            if self.path_back_to(root, &next, path, visited) {
                return true;
            }
            path.pop();
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
