use super::traits::ConfigSection;
use crate::error::EvoartError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the best genome's rendering is written (PNG)
    pub image_path: PathBuf,
    /// Optional JSON dump of the best genome
    pub genome_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("final_abstract_art.png"),
            genome_path: None,
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), EvoartError> {
        if self.image_path.as_os_str().is_empty() {
            return Err(EvoartError::Configuration(
                "Output image path must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
