use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvoartError {
    #[error("Invalid canvas: {width}x{height} (both dimensions must be positive)")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvoartError>;
