use criterion::{criterion_group, criterion_main, Criterion};

use twophase::cubie::CubieCube;
use twophase::moves::Move::*;
use twophase::solver::solve;

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubieCube Moves");
    group.bench_function("apply_moves", |b| {
        b.iter(|| CubieCube::default().apply_moves(&[R, U, R3, U3]))
    });
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    c.bench_function("Solver", |b| {
        b.iter(|| solve("R U R' U' F L' D' B2 R' U'").unwrap())
    });
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
