pub mod renderer;
pub mod fitness;

pub use renderer::{render, Renderer};
pub use fitness::{FitnessBreakdown, FitnessEvaluator};
