use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use planar_embed::prelude::*;

/// `side x side` grid with one diagonal per square: a planar graph with
/// close to `3n` edges.
fn triangulated_grid(side: usize) -> ListGraph {
    let mut g = generators::grid(side, side);
    for r in 0..side - 1 {
        for c in 0..side - 1 {
            g.add_edge(NodeId::new(r * side + c), NodeId::new((r + 1) * side + c + 1));
        }
    }
    g
}

/// The triangulated grid plus the crossing diagonal of a central square;
/// the interior is rigid, so this is no longer planar.
fn obstructed_grid(side: usize) -> ListGraph {
    let mut g = triangulated_grid(side);
    let mid = side / 2;
    g.add_edge(NodeId::new(mid * side + mid + 1), NodeId::new((mid + 1) * side + mid));
    g
}

fn bench_planarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("planarity");

    for &side in &[32usize, 64, 128] {
        let planar = triangulated_grid(side);
        let blocked = obstructed_grid(side);
        let n = side * side;

        group.bench_with_input(BenchmarkId::new("check_planarity", n), &n, |b, _| {
            b.iter(|| black_box(check_planarity(&planar)));
        });

        group.bench_with_input(BenchmarkId::new("embed", n), &n, |b, _| {
            b.iter(|| {
                let mut pe = PlanarEmbedding::new(&planar);
                black_box(pe.run(false));
                black_box(pe.into_embedding_map());
            });
        });

        group.bench_with_input(BenchmarkId::new("kuratowski", n), &n, |b, _| {
            b.iter(|| {
                let mut pe = PlanarEmbedding::new(&blocked);
                black_box(pe.run(true));
                black_box(pe.kuratowski_subdivision().map(KuratowskiSubdivision::len));
            });
        });
    }

    group.finish();
}

fn bench_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("layers");

    for &side in &[16usize, 32, 64] {
        let g = triangulated_grid(side);
        let n = side * side;

        group.bench_with_input(BenchmarkId::new("schnyder_drawing", n), &n, |b, _| {
            b.iter(|| {
                let mut d = PlanarDrawing::new(&g);
                black_box(d.run());
            });
        });

        group.bench_with_input(BenchmarkId::new("six_coloring", n), &n, |b, _| {
            b.iter(|| {
                let mut col = PlanarColoring::new(&g);
                black_box(col.run_six_coloring());
            });
        });

        group.bench_with_input(BenchmarkId::new("five_coloring", n), &n, |b, _| {
            b.iter(|| {
                let mut col = PlanarColoring::new(&g);
                black_box(col.run_five_coloring());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_planarity, bench_layers);
criterion_main!(benches);
