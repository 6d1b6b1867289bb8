// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use dtokit::{DtoObject, HydrateOptions, SchemaRegistry, TypeDescriptorBuilder};
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};

fn registry() -> &'static Arc<SchemaRegistry> {
    static REGISTRY: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let node = TypeDescriptorBuilder::new("Node")
            .scalar("label")
            .scalar_with_default("weight", 1)
            .object("parent", "Node")
            .list("children", "Node")
            .build()
            .expect("Node descriptor");
        SchemaRegistry::new()
            .with_options(HydrateOptions::default().max_depth(16))
            .with_type(node)
            .expect("register Node")
            .into_shared()
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Deep input must fail with DepthExceeded, never overflow the stack
    let Ok(obj) = DtoObject::construct(registry(), "Node", Some(&raw), None) else {
        return;
    };

    // Flattened output must hydrate back to the same flat form
    let flat = obj.to_flat_data();
    if let Ok(again) = DtoObject::construct(registry(), "Node", Some(&flat), None) {
        assert_eq!(again.to_flat_data(), flat);
    }
});
