use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seatplan::{
    model::{builder::ModelBuilder, objective::ObjectivePolicy},
    problem::SeatingProblem,
};

// The classic 42-student classroom with all four rule families in play.
fn classroom() -> SeatingProblem {
    SeatingProblem::new(6, 7, 42)
        .fix(21, 2, 3)
        .fix(40, 3, 5)
        .allow_rows(1, vec![0])
        .allow_rows(6, vec![0, 1])
        .allow_rows(11, vec![5])
        .keep_apart(5, 7, 3)
        .keep_apart(1, 21, 2)
        .keep_apart(5, 21, 4)
        .keep_close(12, 14, 2)
        .keep_close(39, 31, 6)
        .keep_close(15, 21, 4)
}

fn bench_model_build(c: &mut Criterion) {
    let policy = ObjectivePolicy::RandomTieBreak { seed: Some(42) };

    c.bench_function("build classroom model", |b| {
        let problem = classroom();
        b.iter(|| ModelBuilder::build(black_box(&problem), policy).unwrap())
    });

    // Pairwise-exclusion encoding is quadratic in the seat count; track how
    // it scales with grid size.
    let mut group = c.benchmark_group("min separation scaling");
    for size in [4u32, 6, 8] {
        let problem = SeatingProblem::new(size, size, size * size)
            .keep_apart(0, 1, size)
            .keep_apart(2, 3, size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &problem, |b, problem| {
            b.iter(|| ModelBuilder::build(black_box(problem), policy).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_model_build);
criterion_main!(benches);
