use crate::error::{EvoartError, Result};
use serde::{Deserialize, Serialize};

/// RGB triple, one byte per channel
pub type RgbColor = [u8; 3];

pub const WHITE: RgbColor = [255, 255, 255];

/// Drawing surface dimensions. Both sides are guaranteed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EvoartError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count, used as the denominator of the coverage ratio
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Inclusive bounds on the number of shapes in a freshly created genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCountBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for ShapeCountBounds {
    fn default() -> Self {
        Self { min: 10, max: 100 }
    }
}
