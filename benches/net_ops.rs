//! Benchmarks for net operations.

use beziernet::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::Point2;

fn grid_input(n: usize) -> (Vec<Point2<f64>>, Vec<[usize; 4]>) {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    let mut loops = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            points.push(Point2::new(i as f64, j as f64));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            loops.push([v00, v10, v11, v01]);
        }
    }

    (points, loops)
}

/// Grid of unit squares, checkerboard-tagged with operands A and B.
fn create_grid_net(n: usize) -> BezierNet {
    let (points, loops) = grid_input(n);
    let mut net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
    for (k, f) in net.face_ids().collect::<Vec<_>>().into_iter().enumerate() {
        let (i, j) = (k % n, k / n);
        net.set_membership(f, if (i + j) % 2 == 0 { 1 } else { 2 }).unwrap();
    }
    net
}

fn bench_net_construction(c: &mut Criterion) {
    let (points, loops) = grid_input(20);

    c.bench_function("build_grid_20x20", |b| {
        b.iter(|| {
            let net: BezierNet =
                build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
            net
        });
    });
}

fn bench_edge_removal(c: &mut Criterion) {
    let net = create_grid_net(10);
    let interior: Vec<_> = net
        .halfedge_ids()
        .filter(|&he| he < net.twin(he) && !net.is_boundary_edge(he))
        .collect();

    c.bench_function("remove_interior_edges_10x10", |b| {
        b.iter_batched(
            || net.clone(),
            |mut net| {
                for &he in &interior {
                    if net.check_halfedge(he).is_ok() {
                        net.remove_edge(he).unwrap();
                    }
                }
                net
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_region_resolution(c: &mut Criterion) {
    let mut net = create_grid_net(30);

    c.bench_function("resolve_union_30x30", |b| {
        b.iter(|| net.resolve_region(1, BooleanOp::Union, 2).unwrap());
    });

    c.bench_function("resolve_xor_30x30", |b| {
        b.iter(|| net.resolve_region(1, BooleanOp::Xor, 2).unwrap());
    });

    c.bench_function("resolve_a_only_30x30", |b| {
        b.iter(|| net.resolve_region(1, BooleanOp::Noop, 0).unwrap());
    });
}

criterion_group!(
    benches,
    bench_net_construction,
    bench_edge_removal,
    bench_region_resolution
);
criterion_main!(benches);
