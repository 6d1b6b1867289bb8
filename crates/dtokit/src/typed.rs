// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge between hydrated objects and serde types.

use crate::error::HydrateError;
use crate::object::DtoObject;
use crate::schema::SchemaRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

impl DtoObject {
    /// Deserialize the flat form of the object into `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, HydrateError> {
        Ok(serde_json::from_value(self.to_flat_data())?)
    }

    /// Hydrate an object of `type_name` from any serializable value.
    ///
    /// The value is serialized to plain data first, so its keys go through
    /// the usual key mapping (type aliases, then snake_case normalization).
    pub fn from_serialize<T: Serialize + ?Sized>(
        registry: &Arc<SchemaRegistry>,
        type_name: &str,
        value: &T,
    ) -> Result<Self, HydrateError> {
        let raw = serde_json::to_value(value)?;
        Self::construct(registry, type_name, Some(&raw), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDescriptorBuilder;
    use serde::Deserialize;

    #[derive(Debug, Serialize)]
    struct SignupForm {
        first_name: String,
        home_city: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        first_name: String,
        home_city: Option<String>,
    }

    fn registry() -> Arc<SchemaRegistry> {
        SchemaRegistry::new()
            .with_type(
                TypeDescriptorBuilder::new("Profile")
                    .typed("firstName", "string")
                    .typed("homeCity", "string")
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .into_shared()
    }

    #[test]
    fn test_serialize_then_deserialize() {
        let reg = registry();
        let form = SignupForm {
            first_name: "Ada".into(),
            home_city: Some("London".into()),
        };
        let obj = DtoObject::from_serialize(&reg, "Profile", &form).unwrap();
        let profile: Profile = obj.deserialize_into().unwrap();
        assert_eq!(
            profile,
            Profile {
                first_name: "Ada".into(),
                home_city: Some("London".into()),
            }
        );
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        let reg = registry();
        let obj = DtoObject::new(&reg, "Profile").unwrap();
        // firstName is null
        let err = obj.deserialize_into::<Profile>().unwrap_err();
        assert!(matches!(err, HydrateError::Typed(_)));
    }
}
