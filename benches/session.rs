use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use treasure_hunt::game::placement::{generate, PlacementConfig};
use treasure_hunt::{DeterministicRng, GameSession, TreasureId};

fn placement_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");

    for count in [20u32, 200, 2000] {
        let config = PlacementConfig::with_area(count, 10.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("generate", count), &config, |b, config| {
            let mut rng = DeterministicRng::new(42);
            b.iter(|| black_box(generate(black_box(config), &mut rng)));
        });
    }

    group.finish();
}

fn session_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("start", |b| {
        let mut session = GameSession::with_seed(42);
        b.iter(|| {
            let count = session.start();
            session.take_events();
            black_box(count)
        });
    });

    // Start, then collect every treasure in layout order
    group.bench_function("full_sweep", |b| {
        let mut session = GameSession::with_seed(42);
        b.iter(|| {
            let count = session.start() as u32;
            for id in 0..count {
                black_box(session.collect(TreasureId::new(id)));
            }
            session.take_events();
            black_box(session.score())
        });
    });

    // Stale and duplicate reports against a live layout
    group.bench_function("missed_collect", |b| {
        let mut session = GameSession::with_seed(42);
        session.start();
        b.iter(|| black_box(session.collect(black_box(TreasureId::new(9999)))));
    });

    group.bench_function("fingerprint", |b| {
        let mut session = GameSession::with_seed(42);
        session.start();
        b.iter(|| black_box(session.fingerprint()));
    });

    group.finish();
}

criterion_group!(benches, placement_benchmarks, session_benchmarks);
criterion_main!(benches);
