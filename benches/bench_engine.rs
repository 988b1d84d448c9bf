use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use evokit::engine::Engine;
use evokit::error::Result;
use evokit::genome::{Genome, RealGenome};
use evokit::individual::Individual;
use evokit::operators::{
    ElitistTournamentSelection, Evaluate, Operator, ParallelEvaluate, PointCrossover,
    PointMutation,
};
use evokit::population::Population;
use evokit::problem::Problem;
use evokit::rng::{Prng, SharedRandom};

struct Rastrigin {
    rng: SharedRandom,
}

impl Problem for Rastrigin {
    type Genome = RealGenome;

    fn create_random_individual(&self) -> Individual<RealGenome> {
        let genome = RealGenome::random(10, -5.12, 5.12, 2, self.rng.as_ref())
            .expect("valid gene domain");
        Individual::new(genome)
    }

    fn evaluate(&self, individual: &mut Individual<RealGenome>) -> Result<()> {
        let n = individual.genome().len();
        let mut f = 10.0 * n as f64;
        for i in 0..n {
            let x = individual.genome().gene(i);
            f += x * x - 10.0 * (2.0 * std::f64::consts::PI * x).cos();
        }
        individual.set_fitness(-f);
        Ok(())
    }

    fn describe(&self) -> String {
        "negated Rastrigin function in 10 dimensions".to_string()
    }
}

fn bench_evaluation(c: &mut Criterion) {
    let rng: SharedRandom = Arc::new(Prng::with_seed(42));
    let problem = Arc::new(Rastrigin {
        rng: Arc::clone(&rng),
    });

    let population: Population<RealGenome> = Population::from_individuals(
        (0..2000)
            .map(|_| problem.create_random_individual())
            .collect(),
    );

    let mut group = c.benchmark_group("evaluation");

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut pop = population.clone();
            Evaluate::new(Arc::clone(&problem)).operate(&mut pop).unwrap();
            pop
        })
    });

    for threshold in [10, 100, 500] {
        group.bench_with_input(
            BenchmarkId::new("parallel", threshold),
            &threshold,
            |b, &threshold| {
                b.iter(|| {
                    let mut pop = population.clone();
                    ParallelEvaluate::with_threshold(Arc::clone(&problem), threshold)
                        .unwrap()
                        .operate(&mut pop)
                        .unwrap();
                    pop
                })
            },
        );
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    c.bench_function("engine_run_100x20", |b| {
        b.iter(|| {
            let rng: SharedRandom = Arc::new(Prng::with_seed(42));
            let problem = Arc::new(Rastrigin {
                rng: Arc::clone(&rng),
            });

            let mut engine =
                Engine::new(Arc::clone(&problem), 100, 20, Arc::clone(&rng)).unwrap();
            engine.add_operator(PointCrossover::new(0.6, Arc::clone(&rng)).unwrap());
            engine.add_operator(PointMutation::new(0.02, Arc::clone(&rng)).unwrap());
            engine.add_operator(Evaluate::new(Arc::clone(&problem)));
            engine.add_operator(ElitistTournamentSelection::new(2, Arc::clone(&rng)).unwrap());

            engine.run_to_completion().unwrap()
        })
    });
}

criterion_group!(benches, bench_evaluation, bench_full_run);
criterion_main!(benches);
