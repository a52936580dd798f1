use super::evolution_engine::{GenerationStats, ProgressCallback};

/// Reports progress through the `log` facade
#[derive(Debug, Default)]
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Evaluating generation {}...", generation + 1);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        log::info!(
            "Generation {} complete. Best fitness: {:.2}, mean: {:.2}, mean shapes: {:.1}",
            stats.generation + 1,
            stats.best_fitness,
            stats.mean_fitness,
            stats.mean_shapes
        );
    }

    fn on_genome_evaluated(&mut self, genome_num: usize, total: usize) {
        if genome_num % 10 == 0 || genome_num == total {
            log::debug!("  Evaluated {}/{} genomes", genome_num, total);
        }
    }
}
