//! Benchmarks for member registry lookup paths.
//!
//! Tests the operations consumers hit in hot loops:
//! - Cached lookup by declaration id
//! - Cached lookup by name
//! - Cold materialization of a single member
//! - Bulk population of a large scope

extern crate declscope;

use criterion::{criterion_group, criterion_main, Criterion};
use declscope::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

fn populated(count: usize) -> (Arc<TableSource>, MemberRegistry, Vec<DeclId>) {
    let source = Arc::new(TableSource::new());
    let ids: Vec<_> = (0..count)
        .map(|i| {
            source.add_global(
                &format!("g_var_{i}"),
                MemberPayload {
                    type_name: "u64".to_string(),
                    offset: Some((i * 8) as u32),
                    flags: MemberFlags::PUBLIC | MemberFlags::STATIC,
                },
            )
        })
        .collect();

    let mut registry = MemberRegistry::new(source.clone(), None);
    registry.load();
    (source, registry, ids)
}

/// Benchmark a hot id lookup against a loaded registry of 1k members.
fn bench_get_cached(c: &mut Criterion) {
    let (_source, mut registry, ids) = populated(1000);
    let id = ids[ids.len() / 2];

    c.bench_function("registry_get_cached", |b| {
        b.iter(|| {
            let member = registry.get(black_box(id)).unwrap();
            black_box(member)
        });
    });
}

/// Benchmark a hot name lookup against a loaded registry of 1k members.
fn bench_find_by_name_cached(c: &mut Criterion) {
    let (_source, mut registry, _ids) = populated(1000);

    c.bench_function("registry_find_by_name_cached", |b| {
        b.iter(|| {
            let member = registry.find_by_name(black_box("g_var_500")).unwrap();
            black_box(member)
        });
    });
}

/// Benchmark cold materialization: every iteration parks the member again so the
/// next lookup has to go through recovery.
fn bench_get_with_recovery(c: &mut Criterion) {
    let (_source, mut registry, ids) = populated(1000);
    let id = ids[0];

    c.bench_function("registry_get_with_recovery", |b| {
        b.iter(|| {
            let member = registry.get(black_box(id)).unwrap();
            registry.unload_member(&member);
            black_box(member)
        });
    });
}

/// Benchmark populating a fresh registry from a 1k-declaration scope.
fn bench_bulk_load(c: &mut Criterion) {
    let source = Arc::new(TableSource::new());
    for i in 0..1000 {
        source.add_global(&format!("g_var_{i}"), MemberPayload::default());
    }

    c.bench_function("registry_bulk_load", |b| {
        b.iter(|| {
            let mut registry = MemberRegistry::new(source.clone(), None);
            registry.load();
            black_box(registry.len())
        });
    });
}

criterion_group!(
    benches,
    bench_get_cached,
    bench_find_by_name_cached,
    bench_get_with_recovery,
    bench_bulk_load
);
criterion_main!(benches);
