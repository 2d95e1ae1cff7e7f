//! Benchmark suite for lifesim scoring.
//!
//! This module provides performance benchmarks for:
//! - Single-condition scoring
//! - Habit impact ranking
//! - Full simulation reports
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Save baseline for comparison
//! cargo bench -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -- --baseline main
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lifesim::{Condition, HabitCatalog, HabitProfile, RiskScorer, SimulationSession};

fn bench_score(c: &mut Criterion) {
    let catalog = HabitCatalog::builtin();
    let scorer = RiskScorer::new(&catalog);
    let baseline = HabitProfile::baseline(&catalog);

    let mut group = c.benchmark_group("score");
    for condition in Condition::ALL {
        group.bench_with_input(
            BenchmarkId::new("baseline", condition),
            &condition,
            |b, &condition| b.iter(|| scorer.score(black_box(&baseline), condition)),
        );
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let catalog = HabitCatalog::builtin();
    let scorer = RiskScorer::new(&catalog);
    let baseline = HabitProfile::baseline(&catalog);

    c.bench_function("rank_habit_impact", |b| {
        b.iter(|| scorer.rank_habit_impact(black_box(&baseline)))
    });
}

fn bench_report(c: &mut Criterion) {
    let catalog = HabitCatalog::builtin();
    let mut session = SimulationSession::new(&catalog);
    session.simulate("smoking", 0).ok();
    session.simulate("sleep", 80).ok();

    c.bench_function("simulation_report", |b| b.iter(|| black_box(&session).report()));
}

criterion_group!(benches, bench_score, bench_rank, bench_report);
criterion_main!(benches);
