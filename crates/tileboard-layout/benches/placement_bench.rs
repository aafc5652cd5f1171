//! Benchmarks for tile placement.
//!
//! Run with: cargo bench -p tileboard-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tileboard_layout::{GridGeometry, PlacementItem, SeededRng, place_report};

/// Mixed tile sizes in the editor's 1..=5 range.
fn mixed_items(count: usize) -> Vec<PlacementItem<usize>> {
    (0..count)
        .map(|i| {
            let width = (i % 5) as u16 + 1;
            let height = ((i / 5) % 3) as u16 + 1;
            PlacementItem::new(i, width, height)
        })
        .collect()
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/place");

    for (rows, cols, count) in [(6, 10, 12), (12, 20, 48), (40, 60, 300)] {
        let geometry = GridGeometry::new(rows, cols);
        let items = mixed_items(count);
        group.bench_with_input(
            BenchmarkId::new("mixed", format!("{rows}x{cols}/{count}")),
            &items,
            |b, items| {
                let mut rng = SeededRng::new(42);
                b.iter(|| black_box(place_report(geometry, items, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_saturated(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/saturated");

    // Far more unit tiles than usable cells: every drop costs a full scan.
    for side in [8u16, 16, 32] {
        let geometry = GridGeometry::new(side, side);
        let items: Vec<_> = (0..geometry.cell_count())
            .map(|i| PlacementItem::new(i, 1, 1))
            .collect();
        group.bench_with_input(BenchmarkId::new("unit", side), &items, |b, items| {
            let mut rng = SeededRng::new(7);
            b.iter(|| black_box(place_report(geometry, items, &mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_place, bench_saturated);
criterion_main!(benches);
