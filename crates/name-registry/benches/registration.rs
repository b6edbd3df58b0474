//! # Registration Benchmarks
//!
//! Compares the standard and fast registration paths.
//!
//! ```bash
//! cargo bench --package name-registry --bench registration
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use name_registry::domain::{fast_path, name};
use name_registry::prelude::*;
use std::time::Duration;

const ADMIN: Address = Address::new([0xad; 20]);
const CALLER: Address = Address::new([0x01; 20]);

const INPUTS: [&str; 4] = [
    "com",
    "Kos-Data.com",
    "https://very-long-label-name-for-benchmarks.example.com",
    "special*char",
];

fn fresh_registry() -> NameRegistryService<InMemoryFunds> {
    let funds = InMemoryFunds::with_balances([(CALLER, Amount::MAX)]);
    let mut config = RegistryConfig::for_testing();
    config.administrator = ADMIN;
    NameRegistryService::new(config, funds).expect("valid config")
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("name-registry/validate");

    for input in INPUTS {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("standard", input), input, |b, input| {
            b.iter(|| name::validate(black_box(input)));
        });
        group.bench_with_input(BenchmarkId::new("fast", input), input, |b, input| {
            b.iter(|| fast_path::canonicalize(black_box(input)));
        });
    }

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("name-registry/register");

    for count in [100usize, 1_000] {
        let names: Vec<String> = (0..count).map(|i| format!("Label-{i}")).collect();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("standard", count), &names, |b, names| {
            b.iter_batched(
                fresh_registry,
                |mut registry| {
                    let deposit = registry.collateral();
                    for name in names {
                        let _ = registry.register_domain(CALLER, name, deposit);
                    }
                    registry
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("fast", count), &names, |b, names| {
            b.iter_batched(
                fresh_registry,
                |mut registry| {
                    let deposit = registry.collateral();
                    for name in names {
                        let _ = registry.register_domain_fast(CALLER, name, deposit);
                    }
                    registry
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("name-registry/ledger");

    let mut populated = fresh_registry();
    let deposit = populated.collateral();
    for i in 0..10_000 {
        let _ = populated.register_domain(CALLER, &format!("n{i}"), deposit);
    }

    group.bench_function("get_domain", |b| {
        b.iter(|| populated.get_domain(black_box("https://N5000")));
    });

    group.bench_function("get_all_domains", |b| {
        b.iter(|| black_box(populated.get_all_domains().len()));
    });

    group.finish();
}

criterion_group!(
    name = registration_benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5));
    targets =
        bench_validation,
        bench_registration,
        bench_lookup,
);

criterion_main!(registration_benches);
