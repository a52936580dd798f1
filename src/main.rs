use anyhow::Context;
use evoart::config::ConfigManager;
use evoart::engines::generation::{ConsoleProgressCallback, EvolutionEngine};

fn main() -> anyhow::Result<()> {
    // Configure logging; RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConfigManager::load()
        .context("failed to load configuration")?
        .into_inner();

    log::info!(
        "Evolving {} genomes for {} generations (mutation rate {}, elitism {})",
        config.evolution.population_size,
        config.evolution.generations,
        config.evolution.mutation_rate,
        config.evolution.elitism_count
    );

    let mut engine = EvolutionEngine::new(config).context("invalid evolution setup")?;
    let outcome = engine
        .run(ConsoleProgressCallback)
        .context("evolution run failed")?;

    let elapsed = outcome.finished_at - outcome.started_at;
    log::info!(
        "Done in {:.2}s. Best fitness {:.2} written to {}",
        elapsed.num_milliseconds() as f64 / 1000.0,
        outcome.best_fitness,
        outcome.image_path.display()
    );

    Ok(())
}
