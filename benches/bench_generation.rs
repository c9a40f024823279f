use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use genclust::{
    evolution::{ClusterRun, ClusteringConfig, EvolutionOptions},
    rng::RandomNumberGenerator,
    space::PointSpace,
};

fn blob_space(per_blob: usize) -> Arc<PointSpace> {
    let mut rng = RandomNumberGenerator::from_seed(5);
    let mut points = Vec::with_capacity(per_blob * 3);
    for (cx, cy) in [(0.0, 0.0), (20.0, 5.0), (8.0, 18.0)] {
        for _ in 0..per_blob {
            points.push(vec![cx + rng.standard_normal(), cy + rng.standard_normal()]);
        }
    }
    Arc::new(PointSpace::new(points).unwrap())
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    let space = blob_space(200);

    for size in [16, 128, 512].iter() {
        for (label, threshold) in [("sequential", usize::MAX), ("parallel", 1)] {
            let options = EvolutionOptions::builder()
                .population_size(*size)
                .num_generations(1)
                .parallel_threshold(threshold)
                .seed(11)
                .build();
            let run = ClusterRun::new(space.clone(), ClusteringConfig::new(3), options).unwrap();
            let mut rng = RandomNumberGenerator::from_seed(11);
            let mut engine = run.engine(&mut rng).unwrap();

            group.bench_function(BenchmarkId::new(label, size), |b| {
                b.iter(|| engine.next_generation(0.3).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_next_generation);
criterion_main!(benches);
