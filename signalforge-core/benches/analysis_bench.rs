//! Criterion benchmarks for the analysis hot paths.
//!
//! Benchmarks:
//! 1. Full analysis (calculator → fuser → resolver) at several history lengths
//! 2. Indicator snapshot alone
//! 3. Single indicator series (SMA, RSI, MACD histogram)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use signalforge_core::config::IndicatorConfig;
use signalforge_core::indicators::{Indicator, Macd, Rsi, Sma};
use signalforge_core::synthetic::RandomWalk;
use signalforge_core::{Analyzer, IndicatorSet, PriceSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(days: usize) -> PriceSeries {
    RandomWalk {
        days,
        drift: 0.0003,
        ..RandomWalk::default()
    }
    .generate(42)
    .expect("synthetic series is valid")
}

// ── 1. Full analysis ─────────────────────────────────────────────────

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let analyzer = Analyzer::default();

    for &days in &[30, 252, 1260] {
        let series = make_series(days);
        group.bench_with_input(BenchmarkId::new("analyze", days), &series, |b, series| {
            b.iter(|| analyzer.analyze(black_box("BENCH"), black_box(series)));
        });
    }

    group.finish();
}

// ── 2. Indicator snapshot ────────────────────────────────────────────

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_snapshot");
    let config = IndicatorConfig::default();

    for &days in &[252, 1260] {
        let series = make_series(days);
        group.bench_with_input(BenchmarkId::new("compute", days), &series, |b, series| {
            b.iter(|| IndicatorSet::compute(black_box(series), black_box(&config)));
        });
    }

    group.finish();
}

// ── 3. Single indicators ─────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_series");
    let series = make_series(1260);
    let points = series.points();

    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(200)),
        Box::new(Rsi::new(14)),
        Box::new(Macd::histogram(12, 26, 9)),
    ];
    for indicator in &indicators {
        group.bench_function(indicator.name(), |b| {
            b.iter(|| indicator.compute(black_box(points)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_snapshot, bench_indicators);
criterion_main!(benches);
