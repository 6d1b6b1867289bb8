// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Key mapping: raw input keys to canonical field names.
//!
//! A raw key is first looked up in reverse in the [`AliasTable`]; when no
//! alias claims it, the key is normalized from snake_case to camelCase.

use crate::alias::AliasTable;

/// Outcome of mapping one raw key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    /// An alias entry claims the raw key.
    Aliased(String),
    /// No alias claims the raw key; the camelCase form is used.
    Normalized(String),
    /// The camelCase form names a field whose alias points at another raw
    /// key. The key populates nothing.
    Shadowed { field: String, alias: String },
}

impl KeyResolution {
    /// Field to populate, or `None` when shadowed.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Aliased(field) | Self::Normalized(field) => Some(field),
            Self::Shadowed { .. } => None,
        }
    }
}

/// Convert `snake_case` to `camelCase`.
///
/// Splits on `_`, upper-cases the first letter of every segment, joins them
/// and lower-cases the first character of the result. Input without
/// underscores only has its first character lower-cased.
pub fn snake_to_camel(input: &str) -> String {
    let mut joined = String::with_capacity(input.len());
    for segment in input.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            joined.extend(first.to_uppercase());
            joined.push_str(chars.as_str());
        }
    }

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(joined.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => joined,
    }
}

/// Map a raw key to its canonical field name, ignoring shadowing.
pub fn canonicalize(raw_key: &str, aliases: &AliasTable) -> String {
    match aliases.field_for_raw(raw_key) {
        Some(field) => field.to_string(),
        None => snake_to_camel(raw_key),
    }
}

/// Map a raw key to the field it populates.
pub fn resolve_key(raw_key: &str, aliases: &AliasTable) -> KeyResolution {
    if let Some(field) = aliases.field_for_raw(raw_key) {
        return KeyResolution::Aliased(field.to_string());
    }

    let field = snake_to_camel(raw_key);
    match aliases.raw_key_for(&field) {
        Some(alias) if alias != raw_key => KeyResolution::Shadowed {
            alias: alias.to_string(),
            field,
        },
        _ => KeyResolution::Normalized(field),
    }
}
