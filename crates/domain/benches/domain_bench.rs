use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{AggregateRoot, MutableStockItem, StockItem, StockItemEvent};
use event_log::{Commit, CommitLocation, EventLocation};

const EAN: &str = "1231231231230";
const SEQUENCE: &str = "bench-sequence";

fn immutable_item(deposits: u64) -> StockItem {
    let mut item = StockItem::factory()
        .create()
        .define(EAN)
        .expect("define");
    for _ in 0..deposits {
        item = item.deposit(1).expect("deposit");
    }
    item
}

fn bench_immutable_deposits(c: &mut Criterion) {
    c.bench_function("domain/immutable_100_deposits", |b| {
        b.iter(|| immutable_item(100));
    });
}

fn bench_mutable_deposits(c: &mut Criterion) {
    c.bench_function("domain/mutable_100_deposits", |b| {
        b.iter(|| {
            let mut item = MutableStockItem::new();
            item.define(EAN).expect("define");
            for _ in 0..100 {
                item.deposit(1).expect("deposit");
            }
            item
        });
    });
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain/replay");

    for count in [10u64, 100, 1_000] {
        let commit: Commit<StockItemEvent> = immutable_item(count).build_commit(
            CommitLocation::first(SEQUENCE),
            EventLocation::first(SEQUENCE),
        );

        group.bench_with_input(BenchmarkId::new("immutable", count), &commit, |b, commit| {
            b.iter(|| StockItem::factory().create().replay(&commit.events));
        });
        group.bench_with_input(BenchmarkId::new("mutable", count), &commit, |b, commit| {
            b.iter(|| MutableStockItem::new().replay(&commit.events));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_immutable_deposits,
    bench_mutable_deposits,
    bench_replay
);
criterion_main!(benches);
