//! Benchmarks for CFR solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kuhn_cfr::cfr::{exploitability, EvalPolicy, Evaluator, TrainConfig, Trainer};
use kuhn_cfr::games::kuhn::KuhnPoker;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let mut trainer = Trainer::new(TrainConfig::default().with_seed(42));

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| {
            trainer.run_iteration();
            black_box(trainer.iteration())
        })
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let mut trainer = Trainer::new(TrainConfig::default().with_seed(42));
            trainer.train(black_box(1000)).iterations
        })
    });
}

fn kuhn_evaluation_benchmark(c: &mut Criterion) {
    let mut trainer = Trainer::new(TrainConfig::default().with_seed(42));
    trainer.train(1000);
    let tables = trainer.into_tables();
    let evaluator = Evaluator::new(EvalPolicy::Current);

    c.bench_function("kuhn_evaluate_1000_hands", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| evaluator.evaluate(&tables, black_box(1000), &mut rng))
    });

    c.bench_function("kuhn_exploitability", |b| {
        b.iter(|| exploitability(&KuhnPoker::new(), black_box(&tables)))
    });
}

criterion_group!(
    benches,
    kuhn_iteration_benchmark,
    kuhn_1000_iterations_benchmark,
    kuhn_evaluation_benchmark
);
criterion_main!(benches);
