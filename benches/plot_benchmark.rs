#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for the compile, sample and render stages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_plotter::prelude::*;

const EXPRESSIONS: [&str; 4] = ["x", "x^3 - 2*x", "sin(x) * cos(x / 2)", "tan(x) + 1/x"];

fn compile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for source in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(source), source, |b, source| {
            b.iter(|| compile(black_box(source)).expect("expression should compile"));
        });
    }

    group.finish();
}

fn sample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for step in [0.1, 0.01, 0.001] {
        let domain = Domain::new(-10.0, 10.0, step).expect("domain should be valid");
        let f = compile("sin(x) * cos(x / 2)").expect("expression should compile");

        group.bench_with_input(BenchmarkId::from_parameter(step), &domain, |b, domain| {
            b.iter(|| sample(&f, black_box(domain)).expect("sampling should succeed"));
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [1, 4, 16] {
        let curves: Vec<Curve> = (0..count)
            .map(|i| {
                let f = compile(EXPRESSIONS[i % EXPRESSIONS.len()]).expect("expression should compile");
                let points = sample(&f, &Domain::STANDARD).expect("sampling should succeed");
                let pattern = [DashPattern::Solid, DashPattern::Dashed, DashPattern::Dotted][i % 3];
                Curve::new(f.source(), Rgba::BLUE, pattern, points)
            })
            .collect();
        let renderer = ChartRenderer::default();

        group.bench_with_input(BenchmarkId::new("framebuffer", count), &curves, |b, curves| {
            b.iter(|| renderer.to_framebuffer(black_box(curves)).expect("render should succeed"));
        });
        group.bench_with_input(BenchmarkId::new("svg", count), &curves, |b, curves| {
            b.iter(|| renderer.to_svg(black_box(curves)).expect("render should succeed"));
        });
    }

    group.finish();
}

fn session_benchmark(c: &mut Criterion) {
    c.bench_function("session_plot_and_export", |b| {
        b.iter(|| {
            let mut session = PlotSession::new(RasterAdapter::default());
            session
                .plot(&PlotRequest::new("x^2 / 10", "red", DashPattern::Solid))
                .expect("plot should succeed");
            session
                .plot(&PlotRequest::new("sin(x)", "#0000ff", DashPattern::Dashed))
                .expect("plot should succeed");
            session.export_png().expect("export should succeed")
        });
    });
}

criterion_group!(benches, compile_benchmark, sample_benchmark, render_benchmark, session_benchmark);
criterion_main!(benches);
