use crate::config::OutputConfig;
use crate::engines::generation::genome::Genome;
use crate::error::Result;
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON form of a persisted genome; `genes` is the flat ten-field-per-shape encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeSnapshot {
    pub fitness: f64,
    pub shape_count: usize,
    pub created_at: DateTime<Utc>,
    pub genes: Vec<u32>,
}

impl GenomeSnapshot {
    pub fn new(genome: &Genome, fitness: f64) -> Self {
        Self {
            fitness,
            shape_count: genome.len(),
            created_at: Utc::now(),
            genes: genome.flatten(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn genome(&self) -> Result<Genome> {
        Genome::from_flat(&self.genes)
    }
}

/// Writes the run's durable output. Existing files are overwritten.
pub struct ArtifactWriter {
    config: OutputConfig,
}

impl ArtifactWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Save `image` as PNG at the configured path
    pub fn write_image(&self, image: &RgbImage) -> Result<PathBuf> {
        let path = &self.config.image_path;
        image.save_with_format(path, ImageFormat::Png)?;
        log::info!("Saved artwork to {}", path.display());
        Ok(path.clone())
    }

    /// Dump the genome as JSON when a genome path is configured
    pub fn write_genome(&self, genome: &Genome, fitness: f64) -> Result<Option<PathBuf>> {
        let Some(path) = &self.config.genome_path else {
            return Ok(None);
        };

        let snapshot = GenomeSnapshot::new(genome, fitness);
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        log::info!("Saved genome ({} shapes) to {}", genome.len(), path.display());

        Ok(Some(path.clone()))
    }
}
