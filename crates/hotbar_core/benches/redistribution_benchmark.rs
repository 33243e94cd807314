//! Benchmark for reload/unload over a full belt.
//!
//! Run with: cargo bench --package hotbar_core --bench redistribution_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hotbar_core::{
    reload_belt, unload_belt, GeneralPool, ItemStack, Magazine, QuickAccessSet, StandardHost,
    Weapon, BELT_SLOTS, MAIN_SLOTS,
};

const AMMO: [&str; 3] = ["ammo.rifle", "ammo.pistol", "ammo.shotgun"];

fn create_belt() -> QuickAccessSet {
    let mut belt = QuickAccessSet::new();
    for slot in 0..BELT_SLOTS {
        let ammo = AMMO[slot % AMMO.len()];
        belt.set(slot, Weapon::new(format!("Weapon_{slot}"), Magazine::new(ammo, 30)))
            .unwrap();
    }
    belt
}

fn create_pool() -> GeneralPool {
    // Many small stacks so consumption walks the whole pool
    GeneralPool::from_stacks(
        MAIN_SLOTS,
        (0..MAIN_SLOTS).map(|i| ItemStack::new(AMMO[i % AMMO.len()], 7)),
    )
    .unwrap()
}

fn benchmark_reload_full_belt(c: &mut Criterion) {
    c.bench_function("reload_full_belt", |b| {
        b.iter(|| {
            let mut belt = create_belt();
            let mut pool = create_pool();
            let mut host = StandardHost::new();
            black_box(reload_belt(&mut belt, Some(&mut pool), &mut host))
        });
    });
}

fn benchmark_reload_unload_round_trip(c: &mut Criterion) {
    c.bench_function("reload_unload_round_trip", |b| {
        b.iter(|| {
            let mut belt = create_belt();
            let mut pool = create_pool();
            let mut host = StandardHost::new();
            reload_belt(&mut belt, Some(&mut pool), &mut host);
            black_box(unload_belt(&mut belt, Some(&mut pool), &mut host))
        });
    });
}

fn benchmark_count_matching(c: &mut Criterion) {
    let pool = create_pool();
    let ammo = hotbar_core::AmmoType::new("AMMO.RIFLE");

    c.bench_function("count_matching_full_pool", |b| {
        b.iter(|| black_box(pool.count_matching(black_box(&ammo))));
    });
}

criterion_group!(
    benches,
    benchmark_reload_full_belt,
    benchmark_reload_unload_round_trip,
    benchmark_count_matching
);
criterion_main!(benches);
