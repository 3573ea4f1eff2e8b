//! Scheduler micro-benchmarks: burst submission/drain and nested
//! rescheduling chains.

use std::cell::Cell;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, Criterion};
use tiko_engine::TickScheduler;
use tiko_sdk::SimpleMicrotaskQueue;

fn bench_burst_drain(c: &mut Criterion) {
    c.bench_function("schedule_and_drain_4096", |b| {
        b.iter(|| {
            let scheduler = TickScheduler::new(Rc::new(SimpleMicrotaskQueue::new()));
            for _ in 0..4096 {
                scheduler.schedule(|| {});
            }
            scheduler.process_ticks_and_rejections().unwrap();
        })
    });
}

fn bench_nested_chain(c: &mut Criterion) {
    fn step(scheduler: &Rc<TickScheduler>, remaining: &Rc<Cell<u32>>) {
        let left = remaining.get();
        if left == 0 {
            return;
        }
        remaining.set(left - 1);
        let scheduler_in = scheduler.clone();
        let remaining_in = remaining.clone();
        scheduler.schedule(move || step(&scheduler_in, &remaining_in));
    }

    c.bench_function("nested_reschedule_1024", |b| {
        b.iter(|| {
            let scheduler = Rc::new(TickScheduler::new(Rc::new(SimpleMicrotaskQueue::new())));
            let remaining = Rc::new(Cell::new(1024u32));
            step(&scheduler, &remaining);
            scheduler.process_ticks_and_rejections().unwrap();
        })
    });
}

fn bench_run_if_needed_idle(c: &mut Criterion) {
    c.bench_function("run_if_needed_idle", |b| {
        let scheduler = TickScheduler::new(Rc::new(SimpleMicrotaskQueue::new()));
        b.iter(|| scheduler.run_if_needed().unwrap())
    });
}

criterion_group!(
    benches,
    bench_burst_drain,
    bench_nested_chain,
    bench_run_if_needed_idle
);
criterion_main!(benches);
