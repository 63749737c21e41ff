use std::{hint::black_box, time::Duration};

use criterion::*;
use fixture_chain::{CALLGRIND_PROGRAM, Fixture, NoopTracer, run_callgrind_program, run_helper_program};

criterion_group! {
  name = call_chain;
  config = Criterion::default().warm_up_time(Duration::from_millis(500));
  targets = callgrind_program, single_entries, helper_chain
}

criterion_main!(call_chain);

fn callgrind_program(c: &mut Criterion) {
    c.bench_function("callgrind_program", |b| {
        b.iter(|| {
            let mut fixture = Fixture::new();
            black_box(run_callgrind_program(&mut fixture))
        })
    });
}

fn single_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry");
    for step in CALLGRIND_PROGRAM {
        group.bench_with_input(
            BenchmarkId::from_parameter(step.entry),
            &step,
            |b, step| {
                b.iter(|| {
                    let mut fixture = Fixture::new();
                    fixture.reset(black_box(step.counter), 0);
                    fixture.call(step.entry);
                    fixture.counter()
                })
            },
        );
    }
    group.finish();
}

fn helper_chain(c: &mut Criterion) {
    c.bench_function("helper_chain", |b| {
        b.iter(|| black_box(run_helper_program(&mut NoopTracer)))
    });
}
