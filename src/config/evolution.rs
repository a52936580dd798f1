use super::traits::ConfigSection;
use crate::error::EvoartError;
use crate::types::ShapeCountBounds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub elitism_count: usize,
    pub tournament_size: usize,
    pub min_shapes: usize,
    pub max_shapes: usize,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            mutation_rate: 0.1,
            elitism_count: 2,
            tournament_size: 5,
            min_shapes: 10,
            max_shapes: 100,
            seed: None,
            parallel_evaluation: false,
        }
    }
}

impl EvolutionConfig {
    pub fn shape_bounds(&self) -> ShapeCountBounds {
        ShapeCountBounds {
            min: self.min_shapes,
            max: self.max_shapes,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvoartError> {
        if self.population_size == 0 {
            return Err(EvoartError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.elitism_count > self.population_size {
            return Err(EvoartError::Configuration(format!(
                "Elitism count ({}) cannot exceed population size ({})",
                self.elitism_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(EvoartError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvoartError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.min_shapes == 0 || self.min_shapes > self.max_shapes {
            return Err(EvoartError::Configuration(format!(
                "Shape count bounds must satisfy 1 <= min <= max, got [{}, {}]",
                self.min_shapes, self.max_shapes
            )));
        }
        Ok(())
    }
}
