use criterion::{criterion_group, criterion_main, Criterion};
use kspwlo_lib::{k_shortest_paths, load_graph, Algorithm, Graph, KspQuery};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/grid.gr")
}

static GRID: Lazy<Graph> = Lazy::new(|| load_graph(&fixture_path()).expect("fixture loads"));
static CORNER_TO_CORNER: Lazy<KspQuery> = Lazy::new(|| KspQuery::new(0, 35, 4, 0.5));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;
    let query = &*CORNER_TO_CORNER;

    for algorithm in Algorithm::ALL {
        c.bench_function(&format!("{algorithm}_grid_k4_theta05"), |b| {
            b.iter(|| {
                let routes = k_shortest_paths(graph, algorithm, query).expect("query is valid");
                black_box(routes.len())
            });
        });
    }
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
