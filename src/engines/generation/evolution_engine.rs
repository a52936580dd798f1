use crate::config::{AppConfig, EvolutionConfig};
use crate::data::artifact::ArtifactWriter;
use crate::engines::evaluation::{FitnessEvaluator, Renderer};
use crate::engines::generation::{
    genome::{random_genome, Genome},
    operators::{crossover, mutate, tournament_selection},
};
use crate::error::EvoartError;
use crate::types::Canvas;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Lifecycle of a run. `Evaluating` and `Reproducing` alternate once per generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvolutionState {
    Initializing,
    Evaluating,
    Reproducing,
    Finalizing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub mean_shapes: f64,
}

impl GenerationStats {
    fn from_population(generation: usize, population: &[Genome], fitness: &[f64]) -> Self {
        let count = population.len().max(1) as f64;
        Self {
            generation,
            best_fitness: fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_fitness: fitness.iter().sum::<f64>() / count,
            mean_shapes: population.iter().map(Genome::len).sum::<usize>() as f64 / count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionOutcome {
    pub best_genome: Genome,
    pub best_fitness: f64,
    /// Scores of the final population, in population order
    pub final_fitness: Vec<f64>,
    pub generations: usize,
    pub history: Vec<GenerationStats>,
    pub image_path: PathBuf,
    pub genome_path: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_genome_evaluated(&mut self, genome_num: usize, total: usize);
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    canvas: Canvas,
    evaluator: FitnessEvaluator,
    writer: ArtifactWriter,
    rng: StdRng,
    state: EvolutionState,
    generation: usize,
    population: Vec<Genome>,
    fitness: Vec<f64>,
    history: Vec<GenerationStats>,
    started_at: DateTime<Utc>,
    outcome: Option<EvolutionOutcome>,
}

impl EvolutionEngine {
    /// Validates the configuration; a bad canvas fails here, before any generation runs.
    pub fn new(config: AppConfig) -> Result<Self, EvoartError> {
        let canvas = config.canvas.canvas()?;
        config.validate()?;

        let rng = match config.evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if config.evolution.tournament_size > config.evolution.population_size {
            log::warn!(
                "Tournament size {} exceeds population size {}; \
                 tournaments will cover the whole population",
                config.evolution.tournament_size,
                config.evolution.population_size
            );
        }

        let renderer = Renderer::with_background(canvas, config.canvas.background);

        Ok(Self {
            config: config.evolution,
            canvas,
            evaluator: FitnessEvaluator::new(renderer),
            writer: ArtifactWriter::new(config.output),
            rng,
            state: EvolutionState::Initializing,
            generation: 0,
            population: Vec::new(),
            fitness: Vec::new(),
            history: Vec::new(),
            started_at: Utc::now(),
            outcome: None,
        })
    }

    pub fn state(&self) -> EvolutionState {
        self.state
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Scores from the most recent evaluation, parallel to [`EvolutionEngine::population`]
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn outcome(&self) -> Option<&EvolutionOutcome> {
        self.outcome.as_ref()
    }

    /// Run the evolution process to completion and persist the best artwork
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<EvolutionOutcome, EvoartError> {
        while self.state != EvolutionState::Done {
            self.step(&mut callback)?;
        }

        self.outcome
            .clone()
            .ok_or_else(|| EvoartError::Generation("run finished without an outcome".to_string()))
    }

    /// Perform one state transition and return the new state
    pub fn step<C: ProgressCallback>(
        &mut self,
        callback: &mut C,
    ) -> Result<EvolutionState, EvoartError> {
        self.state = match self.state {
            EvolutionState::Initializing => {
                self.started_at = Utc::now();
                self.population = self.initialize_population();
                self.generation = 0;
                log::info!(
                    "Initialized population of {} genomes on a {}x{} canvas",
                    self.population.len(),
                    self.canvas.width(),
                    self.canvas.height()
                );
                self.after_generation()
            }
            EvolutionState::Evaluating => {
                callback.on_generation_start(self.generation);
                self.fitness = self.evaluate_population(callback);

                let stats = GenerationStats::from_population(
                    self.generation,
                    &self.population,
                    &self.fitness,
                );
                callback.on_generation_complete(&stats);
                self.history.push(stats);

                EvolutionState::Reproducing
            }
            EvolutionState::Reproducing => {
                self.population = self.create_next_generation();
                self.generation += 1;
                self.after_generation()
            }
            EvolutionState::Finalizing => {
                let outcome = self.finalize(callback)?;
                self.outcome = Some(outcome);
                EvolutionState::Done
            }
            EvolutionState::Done => EvolutionState::Done,
        };

        Ok(self.state)
    }

    fn after_generation(&self) -> EvolutionState {
        if self.generation >= self.config.generations {
            EvolutionState::Finalizing
        } else {
            EvolutionState::Evaluating
        }
    }

    fn initialize_population(&mut self) -> Vec<Genome> {
        let bounds = self.config.shape_bounds();
        (0..self.config.population_size)
            .map(|_| random_genome(&self.canvas, bounds, &mut self.rng))
            .collect()
    }

    fn evaluate_population<C: ProgressCallback>(&self, callback: &mut C) -> Vec<f64> {
        let total = self.population.len();

        if self.config.parallel_evaluation {
            let scores = self.evaluator.evaluate_all(&self.population, true);
            callback.on_genome_evaluated(total, total);
            return scores;
        }

        self.population
            .iter()
            .enumerate()
            .map(|(i, genome)| {
                let score = self.evaluator.evaluate(genome);
                log::debug!(
                    "  [{}/{}] {} shapes, fitness {:.2}",
                    i + 1,
                    total,
                    genome.len(),
                    score
                );
                callback.on_genome_evaluated(i + 1, total);
                score
            })
            .collect()
    }

    fn create_next_generation(&mut self) -> Vec<Genome> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);

        // Elitism: stable sort keeps population order among equal scores
        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.fitness[b]
                .partial_cmp(&self.fitness[a])
                .unwrap_or(Ordering::Equal)
        });

        for &idx in ranked.iter().take(self.config.elitism_count) {
            next_generation.push(self.population[idx].clone());
        }

        // Generate offspring
        while next_generation.len() < size {
            let parent1 = tournament_selection(
                &self.population,
                &self.fitness,
                self.config.tournament_size,
                &mut self.rng,
            );
            let parent2 = tournament_selection(
                &self.population,
                &self.fitness,
                self.config.tournament_size,
                &mut self.rng,
            );

            let child = crossover(&parent1, &parent2, &mut self.rng);
            let child = mutate(&child, self.config.mutation_rate, &self.canvas, &mut self.rng);
            next_generation.push(child);
        }

        next_generation
    }

    fn finalize<C: ProgressCallback>(
        &mut self,
        callback: &mut C,
    ) -> Result<EvolutionOutcome, EvoartError> {
        callback.on_generation_start(self.generation);
        self.fitness = self.evaluate_population(callback);

        let stats = GenerationStats::from_population(
            self.generation,
            &self.population,
            &self.fitness,
        );
        callback.on_generation_complete(&stats);
        self.history.push(stats);

        let best_idx = best_index(&self.fitness).ok_or_else(|| {
            EvoartError::Generation("final population is empty".to_string())
        })?;
        let best_genome = self.population[best_idx].clone();
        let best_fitness = self.fitness[best_idx];

        log::info!(
            "Evolution complete after {} generations. Best fitness {:.2} ({} shapes)",
            self.generation,
            best_fitness,
            best_genome.len()
        );

        let image = self.evaluator.renderer().render(&best_genome);
        let image_path = self.writer.write_image(&image)?;
        let genome_path = self.writer.write_genome(&best_genome, best_fitness)?;

        Ok(EvolutionOutcome {
            best_genome,
            best_fitness,
            final_fitness: self.fitness.clone(),
            generations: self.generation,
            history: self.history.clone(),
            image_path,
            genome_path,
            started_at: self.started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Index of the highest score; the earliest one wins ties
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .fold(None, |best: Option<usize>, (i, &score)| match best {
            Some(b) if fitness[b] >= score => Some(b),
            _ => Some(i),
        })
}
