use crate::engines::evaluation::renderer::Renderer;
use crate::engines::generation::genome::Genome;
use crate::types::Canvas;
use image::RgbImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Points per distinct pixel color in the rendered image
pub const COLOR_DIVERSITY_WEIGHT: f64 = 5.0;
/// Points for a nominal shape area at least as large as the canvas
pub const COVERAGE_WEIGHT: f64 = 50.0;

/// Individual terms of a fitness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub distinct_colors: usize,
    pub color_diversity: f64,
    pub coverage_ratio: f64,
    pub coverage: f64,
}

impl FitnessBreakdown {
    pub fn score(&self) -> f64 {
        self.color_diversity + self.coverage
    }
}

/// Scores genomes by rendering them and rewarding color variety and covered area.
///
/// Coverage uses the sum of the shapes' own areas, so overlaps are counted
/// several times before the ratio is clamped to 1.0.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    renderer: Renderer,
}

impl FitnessEvaluator {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn evaluate(&self, genome: &Genome) -> f64 {
        self.breakdown(genome).score()
    }

    pub fn breakdown(&self, genome: &Genome) -> FitnessBreakdown {
        let img = self.renderer.render(genome);
        let distinct_colors = count_distinct_colors(&img);
        let coverage_ratio = coverage_ratio(genome, self.renderer.canvas());

        FitnessBreakdown {
            distinct_colors,
            color_diversity: distinct_colors as f64 * COLOR_DIVERSITY_WEIGHT,
            coverage_ratio,
            coverage: coverage_ratio * COVERAGE_WEIGHT,
        }
    }

    /// Score every genome, preserving population order
    pub fn evaluate_all(&self, population: &[Genome], parallel: bool) -> Vec<f64> {
        if parallel {
            population.par_iter().map(|genome| self.evaluate(genome)).collect()
        } else {
            population.iter().map(|genome| self.evaluate(genome)).collect()
        }
    }
}

pub fn count_distinct_colors(img: &RgbImage) -> usize {
    img.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
}

/// `min(total_area / canvas_area, 1.0)`
pub fn coverage_ratio(genome: &Genome, canvas: &Canvas) -> f64 {
    (genome.total_area() as f64 / canvas.area() as f64).min(1.0)
}
