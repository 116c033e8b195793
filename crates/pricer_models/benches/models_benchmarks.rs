//! Criterion benchmarks for the Black-Scholes engine.
//!
//! Measures single-contract price and Greeks evaluation, and a sequential
//! strike strip to characterise per-call cost at grid sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::OptionSide;
use pricer_models::analytical::{greeks, norm_cdf, price};
use pricer_models::instruments::{valuation, ContractParameters};

fn reference_contract(side: OptionSide) -> ContractParameters<f64> {
    ContractParameters::new(100.0, 105.0, 0.25, 0.05, 0.2, side).unwrap()
}

/// Benchmark the normal CDF across both approximation branches.
fn bench_norm_cdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_cdf");

    for x in [0.5_f64, 3.0, 8.0] {
        group.bench_with_input(BenchmarkId::from_parameter(x), &x, |b, &x| {
            b.iter(|| norm_cdf(black_box(-x)));
        });
    }

    group.finish();
}

/// Benchmark a single price and Greeks call.
fn bench_single_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_contract");

    for side in [OptionSide::Call, OptionSide::Put] {
        let params = reference_contract(side);

        group.bench_with_input(BenchmarkId::new("price", side), &params, |b, params| {
            b.iter(|| price(black_box(params)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("greeks", side), &params, |b, params| {
            b.iter(|| greeks(black_box(params)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("valuation", side), &params, |b, params| {
            b.iter(|| valuation(black_box(params)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a strike strip evaluated one contract at a time.
fn bench_strike_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strike_strip");
    let base = reference_contract(OptionSide::Call);

    for size in [10, 100, 1000] {
        let strikes: Vec<f64> = (0..size)
            .map(|i| 50.0 + 100.0 * i as f64 / (size - 1) as f64)
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &strikes, |b, strikes| {
            b.iter(|| {
                strikes
                    .iter()
                    .map(|&k| price(&base.with_strike(black_box(k)).unwrap()).unwrap())
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_norm_cdf,
    bench_single_contract,
    bench_strike_strip
);
criterion_main!(benches);
