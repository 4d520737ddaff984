use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use event_log::{CommitBuilder, CommitLocation, DomainEvent, EventBasket, EventList, EventLocation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
enum BenchEvent {
    Deposited { quantity: u64 },
}

impl DomainEvent for BenchEvent {
    const EVENT_TYPES: &'static [&'static str] = &["Deposited"];

    fn event_type(&self) -> &'static str {
        "Deposited"
    }
}

fn build_list(count: u64) -> EventList<BenchEvent> {
    (0..count).fold(EventList::new(), |list, quantity| {
        list.push(BenchEvent::Deposited { quantity })
    })
}

fn bench_list_push(c: &mut Criterion) {
    let base = build_list(10_000);

    c.bench_function("event_log/list_push_onto_10k", |b| {
        b.iter(|| base.push(BenchEvent::Deposited { quantity: 1 }));
    });
}

fn bench_basket_add(c: &mut Criterion) {
    c.bench_function("event_log/basket_add_1k", |b| {
        b.iter(|| {
            let mut basket = EventBasket::new();
            for quantity in 0..1_000 {
                basket.add(BenchEvent::Deposited { quantity });
            }
            basket
        });
    });
}

fn bench_build_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_log/build_commit");

    for count in [10u64, 100, 1_000] {
        let list = build_list(count);
        let mut basket = EventBasket::new();
        for quantity in 0..count {
            basket.add(BenchEvent::Deposited { quantity });
        }

        group.bench_with_input(BenchmarkId::new("list", count), &list, |b, list| {
            b.iter(|| list.build_commit(CommitLocation::first("S"), EventLocation::first("S")));
        });
        group.bench_with_input(BenchmarkId::new("basket", count), &basket, |b, basket| {
            b.iter(|| basket.build_commit(CommitLocation::first("S"), EventLocation::first("S")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_list_push,
    bench_basket_add,
    bench_build_commit
);
criterion_main!(benches);
