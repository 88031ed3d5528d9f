//! Benchmarks for the authority's hot paths.
//!
//! Run with: cargo bench
//!
//! This will generate HTML reports in target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coop_kitchen::core::{ClientId, HolderId, KitchenConfig};
use coop_kitchen::net::{Replica, Request};
use coop_kitchen::sim::{food, KitchenScenario, Soak};

/// Standard kitchen with a patty frying and one replica attached.
fn busy_kitchen() -> (KitchenScenario, Replica) {
    let mut scenario = KitchenScenario::standard(KitchenConfig::default());
    let client = ClientId::new(0);
    let player = scenario.kitchen.join(client).unwrap();
    scenario
        .kitchen
        .spawn(food::PATTY_RAW, HolderId::Player(player))
        .unwrap();
    scenario
        .kitchen
        .receive(client, Request::Interact { counter: scenario.stove })
        .unwrap();

    let mut replica = Replica::new();
    replica.join(&scenario.kitchen.snapshot());
    scenario.kitchen.drain_outbox();
    (scenario, replica)
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("kitchen_tick_frying", |b| {
        b.iter_batched(
            busy_kitchen,
            |(mut scenario, mut replica)| {
                scenario.kitchen.tick(black_box(0.01)).unwrap();
                for envelope in scenario.kitchen.drain_outbox() {
                    replica.apply(&envelope).unwrap();
                }
                black_box(replica.expected_seq())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let (scenario, _) = busy_kitchen();
    c.bench_function("snapshot_encode", |b| {
        b.iter(|| {
            let bytes = scenario.kitchen.snapshot().encode().unwrap();
            black_box(bytes)
        });
    });
}

fn bench_soak(c: &mut Criterion) {
    let mut group = c.benchmark_group("soak_100_steps");

    for players in [1usize, 2, 4].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", players)),
            players,
            |b, &players| {
                b.iter(|| {
                    let mut soak = Soak::new(black_box(17), players).unwrap();
                    black_box(soak.run(100).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_snapshot, bench_soak);
criterion_main!(benches);
