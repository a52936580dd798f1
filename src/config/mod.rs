pub mod traits;
pub mod canvas;
pub mod evolution;
pub mod output;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use canvas::CanvasConfig;
pub use evolution::EvolutionConfig;
pub use output::OutputConfig;
