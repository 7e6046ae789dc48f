#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use argus_core::events::{EventQueue, EventSink, EventType, NetworkEvent};

fn bench_event_queue_emit_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_queue_throughput");

    for capacity in [128, 1024, 16384] {
        group.throughput(criterion::Throughput::Elements(1));
        group.bench_function(format!("capacity_{}", capacity), |b| {
            let queue = EventQueue::with_capacity(capacity).unwrap();
            let event = NetworkEvent::new(EventType::Tcp);
            b.iter(|| {
                queue.emit(black_box(event));
                queue.try_pop().unwrap();
            });
        });
    }
    group.finish();
}

fn bench_event_queue_saturated(c: &mut Criterion) {
    let queue = EventQueue::with_capacity(128).unwrap();
    let event = NetworkEvent::new(EventType::Udp);
    for _ in 0..128 {
        queue.emit(event);
    }

    c.bench_function("event_queue_emit_full", |b| {
        b.iter(|| queue.emit(black_box(event)));
    });
}

criterion_group!(
    benches,
    bench_event_queue_emit_pop,
    bench_event_queue_saturated
);
criterion_main!(benches);
