//! # Entity Store Benchmarks
//!
//! | Operation | Shape |
//! |-----------|-------|
//! | `create` | one record write plus one index rewrite |
//! | `get` | one existence check plus one record read |
//! | `list` | one index read plus one record read per item |
//! | `render_letter` | pure string formatting |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fd_01_entity_store::adapters::{FixedTimeSource, InMemoryKVStore};
use fd_01_entity_store::{entities, EntityStoreApi, IndexedStore, StoreContext};
use fd_02_api_gateway::letter::render_letter;
use shared_types::Dispute;

const NOW: u64 = 1_714_521_600_000;

fn dispute(i: usize) -> Dispute {
    Dispute {
        id: format!("d{i}"),
        patient_name: format!("Patient {i}"),
        billed_amount: 450.0 + i as f64,
        fmv_amount: 185.5,
        provider_name: "Metropolitan General Hospital".into(),
        date_of_service: "2024-03-15".into(),
        ..Dispute::default()
    }
}

fn populated(count: usize) -> IndexedStore<Dispute, InMemoryKVStore> {
    let ctx = StoreContext::new(InMemoryKVStore::new(), Arc::new(FixedTimeSource(NOW)));
    let store = entities::disputes(ctx);
    for i in 0..count {
        store.create(dispute(i)).unwrap();
    }
    store
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("fd-01-create");
    group.measurement_time(Duration::from_secs(5));

    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("into_index_of", size), &size, |b, &size| {
            let store = populated(size);
            let mut next = size;
            b.iter(|| {
                next += 1;
                black_box(store.create(dispute(next)).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let store = populated(1_000);
    c.bench_function("fd-01-get", |b| b.iter(|| black_box(store.get("d500").unwrap())));
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("fd-01-list");
    let store = populated(1_000);

    for limit in [10, 50, 500] {
        group.throughput(Throughput::Elements(limit as u64));
        group.bench_with_input(BenchmarkId::new("page", limit), &limit, |b, &limit| {
            b.iter(|| black_box(store.list(Some("100"), Some(limit)).unwrap()))
        });
    }
    group.finish();
}

fn bench_letter(c: &mut Criterion) {
    let d = dispute(1).with_recomputed_variance();
    c.bench_function("fd-02-render-letter", |b| {
        b.iter(|| black_box(render_letter(&d, NOW)))
    });
}

criterion_group!(benches, bench_create, bench_get, bench_list, bench_letter);
criterion_main!(benches);
