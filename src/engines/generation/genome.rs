//! Genome representation for the rectangle art evolver
//!
//! A genome is an ordered list of [`ShapeGene`]s. The renderer paints them in
//! sequence, so later shapes cover earlier ones and the order is part of the
//! individual's identity.
//!
//! # Why structured genes instead of a flat number list?
//!
//! Every shape has exactly ten fields. Keeping them in a named struct means
//! the operators can never split a record in half:
//! - **Crossover**: works on whole shapes (slice concatenation)
//! - **Mutation**: knows whether a field is a coordinate or a color channel
//! - **Invariants**: `x0 <= x1` and `y0 <= y1` can be checked per shape
//!
//! The flat form ([`Genome::flatten`] / [`Genome::from_flat`]) is kept for
//! serialization, where each shape occupies [`SHAPE_STRIDE`] consecutive values.
//!
//! # Example
//!
//! ```
//! use evoart::engines::generation::genome::{Genome, ShapeGene};
//!
//! let genome = Genome::from_shapes(vec![ShapeGene {
//!     x0: 10, y0: 20, x1: 110, y1: 70,
//!     fill: [200, 30, 30],
//!     outline: [0, 0, 0],
//! }]);
//! assert_eq!(genome.flatten().len(), 10);
//! ```

use crate::error::{EvoartError, Result};
use crate::types::{Canvas, RgbColor, ShapeCountBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of scalar fields per shape in the flat encoding
pub const SHAPE_STRIDE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeGene {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub fill: RgbColor,
    pub outline: RgbColor,
}

impl ShapeGene {
    /// Random rectangle with `x1 >= x0` and `y1 >= y0`
    pub fn random<R: Rng>(canvas: &Canvas, rng: &mut R) -> Self {
        let x0 = rng.gen_range(0..=canvas.width());
        let y0 = rng.gen_range(0..=canvas.height());
        let x1 = rng.gen_range(x0..=canvas.width());
        let y1 = rng.gen_range(y0..=canvas.height());

        Self {
            x0,
            y0,
            x1,
            y1,
            fill: rng.gen(),
            outline: rng.gen(),
        }
    }

    /// Nominal area, `|x1 - x0| * |y1 - y0|`
    pub fn area(&self) -> u64 {
        self.x0.abs_diff(self.x1) as u64 * self.y0.abs_diff(self.y1) as u64
    }

    /// True when the coordinates are ordered and inside `[0, width] x [0, height]`
    pub fn is_within(&self, canvas: &Canvas) -> bool {
        self.x0 <= self.x1
            && self.y0 <= self.y1
            && self.x1 <= canvas.width()
            && self.y1 <= canvas.height()
    }

    fn to_fields(self) -> [u32; SHAPE_STRIDE] {
        [
            self.x0,
            self.y0,
            self.x1,
            self.y1,
            self.fill[0] as u32,
            self.fill[1] as u32,
            self.fill[2] as u32,
            self.outline[0] as u32,
            self.outline[1] as u32,
            self.outline[2] as u32,
        ]
    }

    fn from_fields(fields: &[u32]) -> Result<Self> {
        let channel = |i: usize| -> Result<u8> {
            u8::try_from(fields[i]).map_err(|_| {
                EvoartError::InvalidGenome(format!(
                    "color channel at offset {} out of range: {}",
                    i, fields[i]
                ))
            })
        };

        Ok(Self {
            x0: fields[0],
            y0: fields[1],
            x1: fields[2],
            y1: fields[3],
            fill: [channel(4)?, channel(5)?, channel(6)?],
            outline: [channel(7)?, channel(8)?, channel(9)?],
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    shapes: Vec<ShapeGene>,
}

impl Genome {
    pub fn from_shapes(shapes: Vec<ShapeGene>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[ShapeGene] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [ShapeGene] {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Sum of the shapes' nominal areas. Overlapping regions count once per shape.
    pub fn total_area(&self) -> u64 {
        self.shapes.iter().map(ShapeGene::area).sum()
    }

    pub fn is_within(&self, canvas: &Canvas) -> bool {
        self.shapes.iter().all(|shape| shape.is_within(canvas))
    }

    pub fn flatten(&self) -> Vec<u32> {
        self.shapes.iter().flat_map(|shape| shape.to_fields()).collect()
    }

    pub fn from_flat(genes: &[u32]) -> Result<Self> {
        if genes.len() % SHAPE_STRIDE != 0 {
            return Err(EvoartError::InvalidGenome(format!(
                "length {} is not a multiple of {}",
                genes.len(),
                SHAPE_STRIDE
            )));
        }

        let shapes = genes
            .chunks_exact(SHAPE_STRIDE)
            .map(ShapeGene::from_fields)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { shapes })
    }
}

impl FromIterator<ShapeGene> for Genome {
    fn from_iter<I: IntoIterator<Item = ShapeGene>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

/// Generate a random genome with a shape count drawn from `bounds`
pub fn random_genome<R: Rng>(canvas: &Canvas, bounds: ShapeCountBounds, rng: &mut R) -> Genome {
    let count = rng.gen_range(bounds.min..=bounds.max);
    (0..count).map(|_| ShapeGene::random(canvas, rng)).collect()
}
