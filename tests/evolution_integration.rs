use evoart::config::AppConfig;
use evoart::data::GenomeSnapshot;
use evoart::engines::evaluation::{FitnessEvaluator, Renderer};
use evoart::engines::generation::{
    EvolutionEngine, EvolutionState, GenerationStats, ProgressCallback, SHAPE_STRIDE,
};
use std::path::PathBuf;

/// Records what the engine reports
#[derive(Default)]
struct TestProgressCallback {
    started: Vec<usize>,
    completed: Vec<GenerationStats>,
    evaluated: usize,
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        println!(
            "Generation {}: Best Fitness = {:.2}, Mean = {:.2}",
            stats.generation + 1,
            stats.best_fitness,
            stats.mean_fitness
        );
        self.completed.push(stats.clone());
    }

    fn on_genome_evaluated(&mut self, _genome_num: usize, _total: usize) {
        self.evaluated += 1;
    }
}

fn output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("evoart-it-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Create a minimal config for fast testing
fn create_test_config(name: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.canvas.width = 120;
    config.canvas.height = 90;
    config.evolution.population_size = 12;
    config.evolution.generations = 4;
    config.evolution.seed = Some(42); // Fixed seed for reproducibility
    config.output.image_path = output_dir(name).join("art.png");
    config
}

#[test]
fn test_end_to_end_default_scenario() {
    let dir = output_dir("e2e");
    let mut config = AppConfig::default();
    config.canvas.width = 800;
    config.canvas.height = 600;
    config.evolution.population_size = 50;
    config.evolution.generations = 5;
    config.evolution.mutation_rate = 0.1;
    config.evolution.elitism_count = 2;
    config.evolution.seed = Some(2024);
    config.evolution.parallel_evaluation = true;
    config.output.image_path = dir.join("final_abstract_art.png");

    let mut engine = EvolutionEngine::new(config).unwrap();
    let outcome = engine.run(TestProgressCallback::default()).unwrap();

    assert_eq!(engine.state(), EvolutionState::Done);
    assert_eq!(outcome.generations, 5);
    assert_eq!(outcome.final_fitness.len(), 50);

    // reported best equals the max of the final population's scores
    let max = outcome
        .final_fitness
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(outcome.best_fitness, max);

    // exactly one artifact, with the canvas dimensions
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(outcome.genome_path, None);

    let img = image::open(&outcome.image_path).unwrap();
    assert_eq!((img.width(), img.height()), (800, 600));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_population_size_and_well_formedness_each_generation() {
    let config = create_test_config("invariants");
    let dir = config.output.image_path.parent().unwrap().to_path_buf();
    let mut engine = EvolutionEngine::new(config).unwrap();
    let mut callback = TestProgressCallback::default();
    let canvas = *engine.canvas();

    while engine.state() != EvolutionState::Done {
        let state = engine.step(&mut callback).unwrap();

        if state != EvolutionState::Done {
            assert_eq!(engine.population().len(), 12);
            for genome in engine.population() {
                assert!(!genome.is_empty());
                assert_eq!(genome.flatten().len() % SHAPE_STRIDE, 0);
                assert!(genome.is_within(&canvas));
            }
        }
    }

    assert_eq!(callback.started, vec![0, 1, 2, 3, 4]);
    assert_eq!(callback.evaluated, 12 * 5);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_best_fitness_never_decreases_with_elitism() {
    let mut config = create_test_config("monotone");
    config.evolution.generations = 8;
    config.evolution.elitism_count = 1;
    config.evolution.mutation_rate = 0.3;
    let dir = config.output.image_path.parent().unwrap().to_path_buf();

    let mut engine = EvolutionEngine::new(config).unwrap();
    let outcome = engine.run(TestProgressCallback::default()).unwrap();

    assert_eq!(outcome.history.len(), 9);
    for pair in outcome.history.windows(2) {
        assert!(
            pair[1].best_fitness >= pair[0].best_fitness,
            "best fitness dropped from {} to {} at generation {}",
            pair[0].best_fitness,
            pair[1].best_fitness,
            pair[1].generation
        );
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let first_config = create_test_config("seed-a");
    let second_config = create_test_config("seed-b");
    let dirs = [
        first_config.output.image_path.parent().unwrap().to_path_buf(),
        second_config.output.image_path.parent().unwrap().to_path_buf(),
    ];

    let first = EvolutionEngine::new(first_config)
        .unwrap()
        .run(TestProgressCallback::default())
        .unwrap();
    let second = EvolutionEngine::new(second_config)
        .unwrap()
        .run(TestProgressCallback::default())
        .unwrap();

    assert_eq!(first.best_genome, second.best_genome);
    assert_eq!(first.final_fitness, second.final_fitness);
    assert_eq!(first.history, second.history);

    for dir in dirs {
        std::fs::remove_dir_all(&dir).ok();
    }
}

#[test]
fn test_best_genome_is_persisted_and_rerenders_identically() {
    let mut config = create_test_config("persist");
    let genome_path = config.output.image_path.with_file_name("best.json");
    config.output.genome_path = Some(genome_path.clone());
    let dir = config.output.image_path.parent().unwrap().to_path_buf();

    let mut engine = EvolutionEngine::new(config).unwrap();
    let outcome = engine.run(TestProgressCallback::default()).unwrap();
    assert_eq!(outcome.genome_path.as_deref(), Some(genome_path.as_path()));

    let snapshot = GenomeSnapshot::load(&genome_path).unwrap();
    let genome = snapshot.genome().unwrap();
    assert_eq!(genome, outcome.best_genome);
    assert_eq!(snapshot.fitness, outcome.best_fitness);

    let renderer = Renderer::new(*engine.canvas());
    let saved = image::open(&outcome.image_path).unwrap().to_rgb8();
    assert_eq!(saved, renderer.render(&genome));

    let evaluator = FitnessEvaluator::new(renderer);
    assert_eq!(evaluator.evaluate(&genome), outcome.best_fitness);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_canvas_aborts_before_any_output() {
    let mut config = create_test_config("invalid");
    config.canvas.width = 0;
    let dir = config.output.image_path.parent().unwrap().to_path_buf();

    assert!(EvolutionEngine::new(config).is_err());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    std::fs::remove_dir_all(&dir).ok();
}
