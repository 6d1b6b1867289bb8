// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hydration Benchmark
//!
//! Measures the cost of filling a typed graph from decoded JSON and of
//! flattening it back:
//! - flat objects with snake_case keys
//! - nested objects with scoped alias tables
//! - typed lists of increasing length

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dtokit::{AliasTable, DtoObject, SchemaRegistry, TypeDescriptorBuilder};
use serde_json::{json, Value};
use std::sync::Arc;

fn registry() -> Arc<SchemaRegistry> {
    SchemaRegistry::new()
        .with_type(
            TypeDescriptorBuilder::new("Customer")
                .scalar("firstName")
                .scalar("lastName")
                .scalar("email")
                .object("address", "Address")
                .list("orders", "Order")
                .build()
                .expect("Customer"),
        )
        .expect("register Customer")
        .with_type(
            TypeDescriptorBuilder::new("Address")
                .scalar("street")
                .scalar("city")
                .scalar("postCode")
                .build()
                .expect("Address"),
        )
        .expect("register Address")
        .with_type(
            TypeDescriptorBuilder::new("Order")
                .scalar("orderId")
                .scalar("total")
                .build()
                .expect("Order"),
        )
        .expect("register Order")
        .into_shared()
}

fn customer_input(orders: usize) -> Value {
    let orders: Vec<Value> = (0..orders)
        .map(|i| json!({ "order_id": i, "total": i as f64 * 1.5 }))
        .collect();
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "mail": "ada@example.com",
        "address": { "street": "St James's Square", "town": "London", "post_code": "SW1Y" },
        "orders": orders,
    })
}

fn aliases() -> AliasTable {
    AliasTable::new()
        .with_alias("email", "mail")
        .expect("email alias")
        .with_nested(
            "address",
            AliasTable::from_pairs([("city", "town")]).expect("city alias"),
        )
}

/// Benchmark: fill a customer with a single order
fn bench_fill_flat(c: &mut Criterion) {
    let reg = registry();
    let input = customer_input(1);
    let table = aliases();

    c.bench_function("fill_customer", |b| {
        b.iter(|| {
            let obj = DtoObject::construct(&reg, "Customer", Some(&input), Some(table.clone()))
                .expect("fill");
            black_box(obj);
        });
    });
}

/// Benchmark: fill with typed lists of increasing size
fn bench_fill_lists(c: &mut Criterion) {
    let reg = registry();
    let mut group = c.benchmark_group("fill_orders");

    for size in [10usize, 100, 1000] {
        let input = customer_input(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let obj = DtoObject::construct(&reg, "Customer", Some(input), Some(aliases()))
                    .expect("fill");
                black_box(obj);
            });
        });
    }

    group.finish();
}

/// Benchmark: flatten a hydrated graph
fn bench_flatten(c: &mut Criterion) {
    let reg = registry();
    let obj = DtoObject::construct(&reg, "Customer", Some(&customer_input(100)), Some(aliases()))
        .expect("fill");

    c.bench_function("flatten_customer_100_orders", |b| {
        b.iter(|| black_box(obj.to_flat_data()));
    });
}

criterion_group!(hydrate_benches, bench_fill_flat, bench_fill_lists, bench_flatten);
criterion_main!(hydrate_benches);
