// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Alias tables: renaming between raw input keys and field names.
//!
//! An [`AliasTable`] is declared field → raw key and read in reverse during
//! key mapping. The mapping is one-to-one: a raw key can be claimed by a
//! single field only, and a second claim is rejected when the table is
//! built rather than resolved by declaration order.
//!
//! Each entry may also carry a nested table, which is handed to the nested
//! object (or to every element of a typed list) hydrated into that field.
//!
//! # Serialized form
//!
//! ```yaml
//! age: years_old            # rename
//! address:                  # rename + nested table
//!   key: home_address
//!   fields:
//!     city: town
//! ```

use crate::error::AliasError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// One field's alias configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasEntry {
    field: String,
    raw_key: Option<String>,
    nested: Option<AliasTable>,
}

impl AliasEntry {
    /// Canonical field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Raw input key renamed onto this field, if any.
    pub fn raw_key(&self) -> Option<&str> {
        self.raw_key.as_deref()
    }

    /// Table scoped to the nested value of this field, if any.
    pub fn nested(&self) -> Option<&AliasTable> {
        self.nested.as_ref()
    }
}

/// Bidirectional, one-to-one alias table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    by_field: HashMap<String, usize>,
    by_raw: HashMap<String, usize>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(field, raw_key)` pairs.
    pub fn from_pairs<I, F, R>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (F, R)>,
        F: Into<String>,
        R: Into<String>,
    {
        let mut table = Self::new();
        for (field, raw_key) in pairs {
            table.insert(field, raw_key)?;
        }
        Ok(table)
    }

    /// Rename `raw_key` onto `field`.
    ///
    /// Re-declaring a field replaces its previous raw key. Claiming a raw key
    /// that already belongs to another field fails.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        raw_key: impl Into<String>,
    ) -> Result<(), AliasError> {
        let field = field.into();
        let raw_key = raw_key.into();
        if field.is_empty() {
            return Err(AliasError::EmptyField);
        }
        if raw_key.is_empty() {
            return Err(AliasError::EmptyRawKey(field));
        }

        if let Some(&idx) = self.by_raw.get(&raw_key) {
            let existing = &self.entries[idx].field;
            if *existing == field {
                return Ok(());
            }
            return Err(AliasError::DuplicateRawKey {
                raw_key,
                existing: existing.clone(),
                field,
            });
        }

        let idx = self.entry_index(field);
        if let Some(previous) = self.entries[idx].raw_key.replace(raw_key.clone()) {
            self.by_raw.remove(&previous);
        }
        self.by_raw.insert(raw_key, idx);
        Ok(())
    }

    /// Attach a table scoped to the nested value of `field`.
    ///
    /// Nested tables never claim raw keys in this table.
    pub fn insert_nested(&mut self, field: impl Into<String>, table: AliasTable) {
        let idx = self.entry_index(field.into());
        self.entries[idx].nested = Some(table);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_alias(
        mut self,
        field: impl Into<String>,
        raw_key: impl Into<String>,
    ) -> Result<Self, AliasError> {
        self.insert(field, raw_key)?;
        Ok(self)
    }

    /// Builder-style [`insert_nested`](Self::insert_nested).
    pub fn with_nested(mut self, field: impl Into<String>, table: AliasTable) -> Self {
        self.insert_nested(field, table);
        self
    }

    /// Field claiming `raw_key`, if any.
    pub fn field_for_raw(&self, raw_key: &str) -> Option<&str> {
        self.by_raw
            .get(raw_key)
            .map(|&idx| self.entries[idx].field.as_str())
    }

    /// Raw key renamed onto `field`, if any.
    pub fn raw_key_for(&self, field: &str) -> Option<&str> {
        self.entry(field).and_then(AliasEntry::raw_key)
    }

    /// Table scoped to `field`, if any.
    pub fn scoped(&self, field: &str) -> Option<&AliasTable> {
        self.entry(field).and_then(AliasEntry::nested)
    }

    /// Entry for `field`, if any.
    pub fn entry(&self, field: &str) -> Option<&AliasEntry> {
        self.by_field.get(field).map(|&idx| &self.entries[idx])
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_index(&mut self, field: String) -> usize {
        if let Some(&idx) = self.by_field.get(&field) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(AliasEntry {
            field: field.clone(),
            raw_key: None,
            nested: None,
        });
        self.by_field.insert(field, idx);
        idx
    }

    fn from_spec(spec: BTreeMap<String, AliasSpec>) -> Result<Self, AliasError> {
        let mut table = Self::new();
        for (field, entry) in spec {
            match entry {
                AliasSpec::Rename(raw_key) => table.insert(field, raw_key)?,
                AliasSpec::Nested(NestedSpec { key, fields }) => {
                    if let Some(raw_key) = key {
                        table.insert(field.clone(), raw_key)?;
                    }
                    table.insert_nested(field, Self::from_spec(fields)?);
                }
            }
        }
        Ok(table)
    }

    fn to_spec(&self) -> BTreeMap<String, AliasSpec> {
        self.entries
            .iter()
            .map(|entry| {
                let spec = match (&entry.raw_key, &entry.nested) {
                    (Some(raw_key), None) => AliasSpec::Rename(raw_key.clone()),
                    (key, nested) => AliasSpec::Nested(NestedSpec {
                        key: key.clone(),
                        fields: nested.as_ref().map(Self::to_spec).unwrap_or_default(),
                    }),
                };
                (entry.field.clone(), spec)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AliasSpec {
    Rename(String),
    Nested(NestedSpec),
}

/// Mapping form of an entry. Only `key` and `fields` are accepted, so a
/// sub-table written without the `fields` wrapper is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NestedSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, AliasSpec>,
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_spec().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = BTreeMap::<String, AliasSpec>::deserialize(deserializer)?;
        Self::from_spec(spec).map_err(serde::de::Error::custom)
    }
}
