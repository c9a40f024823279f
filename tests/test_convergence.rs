use std::sync::Arc;

use genclust::{
    breeding::ReproductionKind,
    cluster::CentroidStrategy,
    evolution::{ClusterRun, ClusteringConfig, EvolutionOptions, MutationSchedule, RunReport},
    mutation::{GaussianNoise, MutationKind},
    selection::SelectorKind,
    space::{euclidean_distance, PointSpace},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

/// Two tight pairs of points, ten units apart.
///
/// Every centroid on the segment joining a pair has the same intra-cluster
/// distance, so the pairs are kept narrow for the centroids to be pinned down.
fn two_pairs() -> Arc<PointSpace> {
    pairs(0.1)
}

fn pairs(width: f64) -> Arc<PointSpace> {
    Arc::new(
        PointSpace::new(vec![
            vec![0.0, 0.0],
            vec![0.0, width],
            vec![10.0, 0.0],
            vec![10.0, width],
        ])
        .unwrap(),
    )
}

/// Random-in-bounds, roulette, average crossover and Gaussian noise whose
/// sigma starts at the data range and shrinks with the mutation probability.
fn annealed_run(space: Arc<PointSpace>, seed: u64) -> RunReport {
    let config = ClusteringConfig::new(2)
        .with_centroid_strategy(CentroidStrategy::RandomInBounds)
        .with_selector(SelectorKind::Roulette)
        .with_reproduction(ReproductionKind::Average)
        .with_mutation(MutationKind::GaussianNoise(
            GaussianNoise::new(1.0).unwrap().with_annealing(),
        ));
    let options = EvolutionOptions::builder()
        .population_size(10)
        .num_generations(20)
        .mutation_schedule(MutationSchedule::default())
        .seed(seed)
        .build();

    ClusterRun::new(space, config, options).unwrap().run().unwrap()
}

fn nearest_centroid_distance(report: &RunReport, target: &[f64]) -> f64 {
    report
        .best
        .centroids()
        .iter()
        .map(|c| euclidean_distance(c, target))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_converges_to_pair_centroids() {
    init_tracing();

    let targets = [[0.0, 0.05], [10.0, 0.05]];
    let mut converged = Vec::new();

    for seed in 0..20 {
        let report = annealed_run(two_pairs(), seed);
        assert_eq!(report.history.len(), 21);

        let initial = report.initial().unwrap();
        let last = report.last().unwrap();
        assert_eq!(last.empty_clusters, 0, "seed {}: {:?}", seed, last.centroids);
        assert!(last.fitness >= initial.fitness);

        let on_target = targets
            .iter()
            .all(|target| nearest_centroid_distance(&report, target) < 0.25);
        if on_target && last.quantization_error < initial.quantization_error {
            converged.push(seed);
        }
    }

    assert!(
        converged.len() >= 16,
        "only seeds {:?} converged",
        converged
    );
}

#[test]
fn test_full_range_noise_keeps_partitions_real() {
    let mut improved = 0;

    for seed in 0..10 {
        let report = annealed_run(pairs(1.0), seed);
        let initial = report.initial().unwrap();
        let last = report.last().unwrap();

        assert_eq!(last.empty_clusters, 0);
        if last.quantization_error < initial.quantization_error {
            improved += 1;
        }
    }

    assert!(improved >= 9, "quantization error fell in {} of 10 runs", improved);
}

#[test]
fn test_elitist_run_never_regresses() {
    let options = EvolutionOptions::builder()
        .population_size(12)
        .num_generations(15)
        .seed(7)
        .build();

    let report = ClusterRun::new(two_pairs(), ClusteringConfig::new(2), options)
        .unwrap()
        .run()
        .unwrap();

    assert!(report
        .history
        .windows(2)
        .all(|w| w[1].fitness >= w[0].fitness));
}

#[test]
fn test_every_variant_combination_runs() {
    let space = Arc::new(
        PointSpace::new(
            (0..12)
                .map(|i| vec![(i % 4) as f64 * 3.0, (i / 4) as f64, (i % 3) as f64])
                .collect(),
        )
        .unwrap(),
    );

    let selectors = [
        SelectorKind::Roulette,
        SelectorKind::Tournament(genclust::selection::TournamentSelection::new(3).unwrap()),
    ];
    let reproductions = [ReproductionKind::OnePointCrossover, ReproductionKind::Average];
    let mutations = [MutationKind::Swap, MutationKind::default()];
    let generators = [CentroidStrategy::RandomInBounds, CentroidStrategy::ShuffleFromData];

    for selector in selectors {
        for reproduction in reproductions {
            for mutation in mutations {
                for generator in generators {
                    let config = ClusteringConfig::new(3)
                        .with_centroid_strategy(generator)
                        .with_selector(selector)
                        .with_reproduction(reproduction)
                        .with_mutation(mutation);
                    let options = EvolutionOptions::builder()
                        .population_size(6)
                        .num_generations(3)
                        .seed(1)
                        .build();

                    let report = ClusterRun::new(space.clone(), config, options)
                        .unwrap()
                        .run()
                        .unwrap();

                    assert_eq!(report.best.cluster_count(), 3);
                    assert!(report
                        .history
                        .iter()
                        .all(|s| s.centroids.iter().flatten().all(|x| x.is_finite())));
                }
            }
        }
    }
}
