// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Target type schemas.
//!
//! Every target type is declared once, up front, as a [`TypeDescriptor`]:
//! its fields, their kinds, optional defaults, setter hooks and a default
//! alias table. Descriptors live in a [`SchemaRegistry`], which resolves the
//! [`Shape`] of any field against the closed set of registered types.
//!
//! # Example
//!
//! ```rust
//! use dtokit::schema::{SchemaRegistry, Shape, TypeDescriptorBuilder};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(
//!     TypeDescriptorBuilder::new("Address")
//!         .typed("city", "string")
//!         .build()?,
//! )?;
//! registry.register(
//!     TypeDescriptorBuilder::new("User")
//!         .scalar("firstName")
//!         .object("address", "Address")
//!         .list("orders", "Order")
//!         .build()?,
//! )?;
//!
//! assert_eq!(registry.resolve("User", "address"), Some(Shape::Object("Address".into())));
//! // `Order` is not registered: the list degrades to a scalar
//! assert_eq!(registry.resolve("User", "orders"), Some(Shape::Scalar));
//! assert_eq!(registry.resolve("User", "bogus"), None);
//! # Ok::<(), dtokit::SchemaError>(())
//! ```

mod builder;
mod descriptor;
mod document;
mod registry;

pub use builder::TypeDescriptorBuilder;
pub use descriptor::{FieldDescriptor, FieldKind, SetterFn, Shape, TypeDescriptor};
pub use document::{FieldSpec, SchemaDocument, TypeSpec};
pub use registry::SchemaRegistry;
