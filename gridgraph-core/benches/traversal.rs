use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridgraph_core::algo::{is_planar, path_exists, reachable_within};
use gridgraph_core::board::{Board, GridPoint};
use gridgraph_core::graph::{Edge, VertexId};

/// An undirected lattice board with every horizontal and vertical neighbour
/// connected.
fn lattice(side: usize) -> (Board, Vec<VertexId>) {
    let mut board = Board::new(false, side, side);
    let mut ids = Vec::with_capacity(side * side);
    for y in 0..side {
        for x in 0..side {
            ids.push(board.spawn_vertex(GridPoint::new(x as i32, y as i32)).unwrap());
        }
    }
    for y in 0..side {
        for x in 0..side {
            let here = ids[y * side + x];
            if x + 1 < side {
                board.add_edge(here, ids[y * side + x + 1]).unwrap();
            }
            if y + 1 < side {
                board.add_edge(here, ids[(y + 1) * side + x]).unwrap();
            }
        }
    }
    (board, ids)
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for side in [4, 8, 16] {
        let (board, ids) = lattice(side);
        let first = ids[0];
        let last = ids[ids.len() - 1];

        group.bench_with_input(BenchmarkId::new("reachable_within", side), &side, |b, _| {
            b.iter(|| reachable_within(board.graph(), black_box(first), black_box(8)))
        });
        group.bench_with_input(BenchmarkId::new("path_exists", side), &side, |b, _| {
            b.iter(|| path_exists(board.graph(), black_box(first), black_box(last)))
        });
        group.bench_with_input(BenchmarkId::new("is_planar", side), &side, |b, _| {
            let candidate = Edge::new(first, last);
            b.iter(|| is_planar(board.graph(), black_box(&candidate)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);
