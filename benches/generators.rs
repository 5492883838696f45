use criterion::{criterion_group, criterion_main, Criterion};
use maze_corridors::{
    generators::{self, RecursiveBacktracker},
    grid_dimensions::RectGridDimensions,
    units::{Height, Width},
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let dimensions = RectGridDimensions::new(Width(32), Height(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(32);

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(dimensions, &mut rng))
    });
}

fn bench_recursive_backtracker_maze_128(c: &mut Criterion) {
    let dimensions = RectGridDimensions::new(Width(128), Height(128)).unwrap();
    let mut rng = StdRng::seed_from_u64(128);

    c.bench_function("recursive_backtracker_maze_128", move |b| {
        b.iter(|| generators::recursive_backtracker(dimensions, &mut rng))
    });
}

fn bench_carve_by_carve_maze_32(c: &mut Criterion) {
    let dimensions = RectGridDimensions::new(Width(32), Height(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(33);

    c.bench_function("carve_by_carve_maze_32", move |b| {
        b.iter(|| {
            let mut walker = RecursiveBacktracker::new(dimensions);
            while walker.step_to_next_carve(&mut rng) != generators::StepOutcome::Finished {}
            walker.into_walls()
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_128,
    bench_carve_by_carve_maze_32
);
criterion_main!(benches);
