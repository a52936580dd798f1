use super::traits::ConfigSection;
use crate::error::{EvoartError, Result};
use crate::types::{Canvas, RgbColor, WHITE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: RgbColor,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: WHITE,
        }
    }
}

impl CanvasConfig {
    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

impl ConfigSection for CanvasConfig {
    fn section_name() -> &'static str {
        "canvas"
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EvoartError::Configuration(format!(
                "Canvas dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
