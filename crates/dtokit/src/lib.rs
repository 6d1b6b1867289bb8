// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed object graphs from untyped key/value data.
//!
//! `dtokit` hydrates decoded JSON, YAML or form data into objects of
//! statically declared target types, and flattens them back.
//!
//! # Features
//!
//! - **Alias tables**: rename raw input keys onto fields, per object or per
//!   type, with nested tables scoped to individual fields
//! - **Key normalization**: `snake_case` input keys populate `camelCase` fields
//! - **Recursive hydration**: nested objects and typed lists are inferred from
//!   declared field shapes
//! - **Setter hooks**: per-field overrides of the population logic
//! - **Default reconciliation**: a second pass re-applies empty defaults
//!   through the same typed pipeline
//!
//! # Example
//!
//! ```rust
//! use dtokit::{AliasTable, DtoObject, SchemaRegistry, TypeDescriptorBuilder};
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::new()
//!     .with_type(
//!         TypeDescriptorBuilder::new("User")
//!             .scalar("firstName")
//!             .scalar("age")
//!             .object("address", "Address")
//!             .list("orders", "Order")
//!             .build()?,
//!     )?
//!     .with_type(TypeDescriptorBuilder::new("Address").scalar("city").build()?)?
//!     .with_type(TypeDescriptorBuilder::new("Order").scalar("id").build()?)?
//!     .into_shared();
//!
//! let aliases = AliasTable::from_pairs([("age", "years_old")])?;
//! let input = json!({
//!     "first_name": "Ada",
//!     "years_old": 36,
//!     "address": { "city": "London" },
//!     "orders": [{ "id": 1 }, { "id": 2 }],
//! });
//!
//! let user = DtoObject::construct(&registry, "User", Some(&input), Some(aliases))?;
//! assert_eq!(user.value("firstName"), Some(&json!("Ada")));
//! assert_eq!(user.value("age"), Some(&json!(36)));
//! assert_eq!(user.list("orders").map(|o| o.len()), Some(2));
//!
//! assert_eq!(
//!     user.to_flat_data(),
//!     json!({
//!         "firstName": "Ada",
//!         "age": 36,
//!         "address": { "city": "London" },
//!         "orders": [{ "id": 1 }, { "id": 2 }],
//!     })
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod alias;
pub mod error;
mod flatten;
mod hydrate;
pub mod naming;
pub mod object;
pub mod options;
pub mod schema;
mod typed;
pub mod value;

pub use alias::{AliasEntry, AliasTable};
pub use error::{AliasError, HydrateError, SchemaError, SetterError};
pub use naming::{canonicalize, resolve_key, snake_to_camel, KeyResolution};
pub use object::{DtoObject, RawFields};
pub use options::{DefaultsPass, HydrateOptions, DEFAULT_MAX_DEPTH};
pub use schema::{
    FieldDescriptor, FieldKind, FieldSpec, SchemaDocument, SchemaRegistry, SetterFn, Shape,
    TypeDescriptor, TypeDescriptorBuilder, TypeSpec,
};
pub use value::{is_empty_value, FieldValue};
