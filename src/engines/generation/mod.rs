pub mod genome;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Genome, ShapeGene, SHAPE_STRIDE};
pub use evolution_engine::{
    EvolutionEngine, EvolutionOutcome, EvolutionState, GenerationStats, ProgressCallback,
};
pub use progress::ConsoleProgressCallback;
