//! Benchmarks for track resolution and grid splitting.
//!
//! Run with: cargo bench -p trellis-layout

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_core::geometry::{Rect, Size};
use trellis_layout::{Fraction, Grid, Relative, ResolutionContext, Scalar, resolve};

// =============================================================================
// Track Data
// =============================================================================

/// Alternating cells, percentages and flex weights.
fn mixed_tracks(count: usize) -> Vec<Scalar> {
    (0..count)
        .map(|i| match i % 3 {
            0 => Scalar::cells(2 + (i % 5) as u32),
            1 => Scalar::percent(3, Relative::Width),
            _ => Scalar::flex(1 + (i % 4) as u32),
        })
        .collect()
}

/// Flex weights with non-terminating shares.
fn fractional_flex(count: usize) -> Vec<Scalar> {
    (0..count)
        .map(|i| Scalar::Flex(Fraction::new(1 + (i % 7) as i128, 3)))
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let ctx = ResolutionContext::uniform(Size::new(400, 120));
    let mut group = c.benchmark_group("resolve");

    for count in [4usize, 16, 64, 256] {
        let mixed = mixed_tracks(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("mixed", count), &mixed, |b, tracks| {
            b.iter(|| resolve(black_box(tracks), black_box(400), black_box(1), &ctx))
        });

        let fractional = fractional_flex(count);
        group.bench_with_input(
            BenchmarkId::new("fractional_flex", count),
            &fractional,
            |b, tracks| b.iter(|| resolve(black_box(tracks), black_box(397), black_box(0), &ctx)),
        );
    }

    group.finish();
}

fn bench_grid_split(c: &mut Criterion) {
    let grid = Grid::new()
        .rows([Scalar::cells(3), Scalar::flex(1), Scalar::cells(1)])
        .columns(mixed_tracks(12))
        .gap(1);
    let area = Rect::new(0, 0, 240, 60);

    c.bench_function("grid_split/dashboard", |b| {
        b.iter(|| grid.split(black_box(area), black_box(area.size())))
    });
}

criterion_group!(benches, bench_resolve, bench_grid_split);
criterion_main!(benches);
