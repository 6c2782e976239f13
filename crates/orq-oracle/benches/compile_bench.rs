//! Benchmarks for oracle compilation
//!
//! Run with: cargo bench -p orq-oracle

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use orq_ir::lower;
use orq_oracle::{CompileOptions, CounterCleanup, OracleStrategy, compile};
use orq_sat::random::random_k_cnf;

/// Random 3-CNFs near the satisfiability threshold (m ≈ 4.26 n).
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_3cnf");

    for num_vars in [8u32, 16, 32, 64] {
        let num_clauses = (f64::from(num_vars) * 4.26) as usize;
        let cnf = random_k_cnf(num_vars, num_clauses, 3, 42);

        for strategy in OracleStrategy::ALL {
            let options = CompileOptions::default()
                .with_strategy(strategy)
                .with_counter_cleanup(CounterCleanup::Uncompute);
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), num_vars),
                &cnf,
                |b, cnf| {
                    b.iter(|| compile(black_box(cnf), black_box(&options)).unwrap());
                },
            );
        }
    }

    group.finish();
}

/// Lowering OR macros to primitive flips.
fn bench_lowering(c: &mut Criterion) {
    let cnf = random_k_cnf(32, 136, 3, 7);
    let oracle = compile(&cnf, &CompileOptions::default()).unwrap();

    c.bench_function("lower_naive_32", |b| {
        b.iter(|| lower(black_box(&oracle.circuit)).unwrap());
    });
}

criterion_group!(benches, bench_strategies, bench_lowering);
criterion_main!(benches);
