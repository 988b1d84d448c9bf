//! End-to-end engine runs: pipelines, reproducibility, interruption.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use evokit::engine::{Engine, RunOutcome};
use evokit::error::{EvoError, Result};
use evokit::genome::{BitGenome, Genome};
use evokit::individual::Individual;
use evokit::operators::{
    DiversityThresholdStats, ElitistTournamentSelection, Evaluate, PointCrossover, PointMutation,
    ReseedEvaluation, StandardStats,
};
use evokit::problem::Problem;
use evokit::rng::{Prng, SharedRandom};

const ONE_MAX_BITS: usize = 16;

/// Maximize the number of set bits.
struct OneMax {
    rng: SharedRandom,
}

impl Problem for OneMax {
    type Genome = BitGenome;

    fn create_random_individual(&self) -> Individual<BitGenome> {
        Individual::new(BitGenome::random(ONE_MAX_BITS, self.rng.as_ref()))
    }

    fn evaluate(&self, individual: &mut Individual<BitGenome>) -> Result<()> {
        let ones = (0..ONE_MAX_BITS)
            .filter(|&i| individual.genome().bit(i))
            .count();
        individual.set_fitness(ones as f64);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("one-max over {} bits", ONE_MAX_BITS)
    }
}

/// A problem whose factory always emits the same genome, so the population
/// starts fully collapsed.
struct Collapsed {
    evaluations: AtomicUsize,
}

impl Problem for Collapsed {
    type Genome = BitGenome;

    fn create_random_individual(&self) -> Individual<BitGenome> {
        Individual::new(BitGenome::from_bits(vec![true, false, true, false]))
    }

    fn evaluate(&self, individual: &mut Individual<BitGenome>) -> Result<()> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        individual.set_fitness(1.0);
        Ok(())
    }

    fn describe(&self) -> String {
        "constant genome".to_string()
    }
}

/// Evaluation that fails unconditionally, to prove evaluation errors abort
/// the run and surface distinctly from interruption.
struct Broken {
    rng: SharedRandom,
}

impl Problem for Broken {
    type Genome = BitGenome;

    fn create_random_individual(&self) -> Individual<BitGenome> {
        Individual::new(BitGenome::random(4, self.rng.as_ref()))
    }

    fn evaluate(&self, _individual: &mut Individual<BitGenome>) -> Result<()> {
        Err(EvoError::Evaluation("objective is unavailable".to_string()))
    }

    fn describe(&self) -> String {
        "broken objective".to_string()
    }
}

/// Evaluation slow enough that a run of many generations can be cancelled
/// while still in flight.
struct Slow {
    rng: SharedRandom,
}

impl Problem for Slow {
    type Genome = BitGenome;

    fn create_random_individual(&self) -> Individual<BitGenome> {
        Individual::new(BitGenome::random(4, self.rng.as_ref()))
    }

    fn evaluate(&self, individual: &mut Individual<BitGenome>) -> Result<()> {
        std::thread::sleep(Duration::from_millis(2));
        individual.set_fitness(0.0);
        Ok(())
    }

    fn describe(&self) -> String {
        "slow objective".to_string()
    }
}

fn one_max_engine(seed: u64) -> (Engine<OneMax>, evokit::operators::StatsHandle<BitGenome>) {
    let rng: SharedRandom = Arc::new(Prng::with_seed(seed));
    let problem = Arc::new(OneMax {
        rng: Arc::clone(&rng),
    });

    let mut engine = Engine::new(Arc::clone(&problem), 40, 60, Arc::clone(&rng)).unwrap();
    engine.add_operator(PointCrossover::new(0.65, Arc::clone(&rng)).unwrap());
    engine.add_operator(PointMutation::new(0.05, Arc::clone(&rng)).unwrap());
    engine.add_operator(Evaluate::new(Arc::clone(&problem)));
    engine.add_operator(ElitistTournamentSelection::new(2, Arc::clone(&rng)).unwrap());

    let stats = StandardStats::with_precision(2);
    let tracker = stats.handle();
    engine.add_operator(stats);

    (engine, tracker)
}

#[test]
fn one_max_run_completes_and_improves() {
    // Capture the per-generation report lines in the test output.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (engine, tracker) = one_max_engine(1209432115);
    let handle = engine.start();
    let (engine, outcome) = handle.join().unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(engine.population().len(), 40);

    let records = tracker.records();
    assert_eq!(records.len(), 60);

    // Best-ever never regresses, and elitist selection keeps real pressure
    // on: the run must end well above a random population's typical best.
    assert!(records.windows(2).all(|w| w[0].best_ever <= w[1].best_ever));
    assert!(tracker.best_ever_fitness() >= 8.0);
    assert!(tracker.best_ever_fitness() <= ONE_MAX_BITS as f64);

    let best = tracker.best_ever_individual().unwrap();
    assert_eq!(best.genome().len(), ONE_MAX_BITS);
}

#[test]
fn identically_seeded_runs_are_identical() {
    let (a, tracker_a) = one_max_engine(77);
    let (b, tracker_b) = one_max_engine(77);

    let (engine_a, _) = a.start().join().unwrap();
    let (engine_b, _) = b.start().join().unwrap();

    assert_eq!(tracker_a.records(), tracker_b.records());
    assert_eq!(
        tracker_a.best_ever_individual().unwrap().genome(),
        tracker_b.best_ever_individual().unwrap().genome()
    );

    for (x, y) in engine_a.population().iter().zip(engine_b.population().iter()) {
        assert_eq!(x.genome(), y.genome());
        assert_eq!(x.fitness(), y.fitness());
    }
}

#[test]
fn tableau_reports_the_full_pipeline() {
    let (engine, _tracker) = one_max_engine(5);
    let tableau = engine.tableau();

    assert!(tableau.starts_with("Problem: one-max over 16 bits\n"));
    assert!(tableau.contains("\tPointCrossover, chi = 0.65\n"));
    assert!(tableau.contains("\tPointMutation, mu = 0.05\n"));
    assert!(tableau.contains("\tEvaluate, using problem: one-max over 16 bits\n"));
    assert!(tableau.contains("\tElitistTournamentSelection, k = 2\n"));
    assert!(tableau.contains("\tStandardStats\n"));
    assert!(tableau.contains("Population size: 40\n"));
    assert!(tableau.contains("Generations: 60\n"));
    assert!(tableau.ends_with("PRNG seed: 5\n"));
}

#[test]
fn cancellation_interrupts_between_generations() {
    let rng: SharedRandom = Arc::new(Prng::with_seed(9));
    let problem = Arc::new(Slow {
        rng: Arc::clone(&rng),
    });

    let mut engine = Engine::new(Arc::clone(&problem), 10, 5_000, Arc::clone(&rng)).unwrap();
    engine.add_operator(Evaluate::new(Arc::clone(&problem)));

    let handle = engine.start();
    handle.cancel();
    let (engine, outcome) = handle.join().unwrap();

    match outcome {
        RunOutcome::Interrupted { generation } => assert!(generation < 5_000),
        RunOutcome::Completed => panic!("a 5000-generation slow run outran the cancel request"),
    }

    // The population is left fully valid: same size, genomes intact.
    assert_eq!(engine.population().len(), 10);
    for ind in engine.population().iter() {
        assert_eq!(ind.genome().len(), 4);
    }
}

#[test]
fn evaluation_failure_aborts_the_run_distinctly_from_interruption() {
    let rng: SharedRandom = Arc::new(Prng::with_seed(11));
    let problem = Arc::new(Broken {
        rng: Arc::clone(&rng),
    });

    let mut engine = Engine::new(Arc::clone(&problem), 6, 10, Arc::clone(&rng)).unwrap();
    engine.add_operator(Evaluate::new(Arc::clone(&problem)));

    let result = engine.start().join();
    match result {
        Err(EvoError::Evaluation(msg)) => assert!(msg.contains("objective is unavailable")),
        other => panic!("expected an evaluation error, got {:?}", other.map(|(_, o)| o)),
    }
}

#[test]
fn deferred_reseeding_relies_on_a_downstream_evaluate() {
    // The collapsed problem keeps diversity at 1/N, so re-seeding fires every
    // generation. In deferred mode the diversity operator injects unevaluated
    // individuals; placing Evaluate after it in the pipeline is what gives
    // every individual a real fitness before the generation ends.
    let rng: SharedRandom = Arc::new(Prng::with_seed(13));
    let problem = Arc::new(Collapsed {
        evaluations: AtomicUsize::new(0),
    });

    let mut engine = Engine::new(Arc::clone(&problem), 8, 3, Arc::clone(&rng)).unwrap();
    engine.add_operator(
        DiversityThresholdStats::new(4, 0.5, 0.25, Arc::clone(&problem))
            .unwrap()
            .with_reseed_evaluation(ReseedEvaluation::Deferred),
    );
    engine.add_operator(Evaluate::new(Arc::clone(&problem)));

    let (engine, outcome) = engine.start().join().unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    for ind in engine.population().iter() {
        assert_eq!(ind.fitness(), 1.0);
    }
    assert!(problem.evaluations.load(Ordering::SeqCst) >= 8 * 3);
}

#[test]
fn immediate_reseeding_needs_no_downstream_evaluate() {
    let rng: SharedRandom = Arc::new(Prng::with_seed(17));
    let problem = Arc::new(Collapsed {
        evaluations: AtomicUsize::new(0),
    });

    let mut engine = Engine::new(Arc::clone(&problem), 8, 3, Arc::clone(&rng)).unwrap();
    engine.add_operator(
        DiversityThresholdStats::new(4, 0.5, 0.0, Arc::clone(&problem)).unwrap(),
    );

    let (engine, outcome) = engine.start().join().unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    for ind in engine.population().iter() {
        assert_eq!(ind.fitness(), 1.0);
    }
}
