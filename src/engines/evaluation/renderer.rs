use crate::engines::generation::genome::{Genome, ShapeGene};
use crate::error::Result;
use crate::types::{Canvas, RgbColor, WHITE};
use image::{Rgb, RgbImage};

/// Rasterizes genomes onto a fixed-size canvas.
///
/// Shapes are painted in genome order over a solid background. Each rectangle
/// covers the inclusive pixel span between its corners (inverted corners are
/// normalized) and gets a one pixel outline on that span's border. Anything
/// outside the canvas is clipped.
#[derive(Debug, Clone)]
pub struct Renderer {
    canvas: Canvas,
    background: RgbColor,
}

impl Renderer {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_background(canvas, WHITE)
    }

    pub fn with_background(canvas: Canvas, background: RgbColor) -> Self {
        Self { canvas, background }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn render(&self, genome: &Genome) -> RgbImage {
        let mut img = RgbImage::from_pixel(
            self.canvas.width(),
            self.canvas.height(),
            Rgb(self.background),
        );

        for shape in genome.shapes() {
            draw_rectangle(&mut img, shape);
        }

        img
    }
}

/// Render `genome` on a white `width` x `height` canvas.
pub fn render(genome: &Genome, width: u32, height: u32) -> Result<RgbImage> {
    let canvas = Canvas::new(width, height)?;
    Ok(Renderer::new(canvas).render(genome))
}

/// Inclusive pixel span of a shape, clipped to the image. `None` when fully off-canvas.
fn clipped_span(shape: &ShapeGene, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let left = shape.x0.min(shape.x1);
    let right = shape.x0.max(shape.x1);
    let top = shape.y0.min(shape.y1);
    let bottom = shape.y0.max(shape.y1);

    if left >= width || top >= height {
        return None;
    }

    Some((left, top, right.min(width - 1), bottom.min(height - 1)))
}

fn draw_rectangle(img: &mut RgbImage, shape: &ShapeGene) {
    let (width, height) = img.dimensions();
    let Some((left, top, right, bottom)) = clipped_span(shape, width, height) else {
        return;
    };

    let fill = Rgb(shape.fill);
    for y in top..=bottom {
        for x in left..=right {
            img.put_pixel(x, y, fill);
        }
    }

    // The outline sits on the unclipped border; edges pushed off-canvas are not drawn.
    let outline = Rgb(shape.outline);
    let true_right = shape.x0.max(shape.x1);
    let true_bottom = shape.y0.max(shape.y1);

    for x in left..=right {
        img.put_pixel(x, top, outline);
        if true_bottom < height {
            img.put_pixel(x, bottom, outline);
        }
    }
    for y in top..=bottom {
        img.put_pixel(left, y, outline);
        if true_right < width {
            img.put_pixel(right, y, outline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(x0: u32, y0: u32, x1: u32, y1: u32, fill: RgbColor, outline: RgbColor) -> ShapeGene {
        ShapeGene { x0, y0, x1, y1, fill, outline }
    }

    #[test]
    fn test_empty_genome_is_background() {
        let img = render(&Genome::default(), 20, 10).unwrap();
        assert_eq!(img.dimensions(), (20, 10));
        assert!(img.pixels().all(|p| p.0 == WHITE));
    }

    #[test]
    fn test_rejects_zero_canvas() {
        assert!(render(&Genome::default(), 0, 10).is_err());
        assert!(render(&Genome::default(), 10, 0).is_err());
    }

    #[test]
    fn test_fill_and_outline_are_inclusive() {
        let genome = Genome::from_shapes(vec![shape(2, 2, 6, 5, [255, 0, 0], [0, 0, 255])]);
        let img = render(&genome, 10, 10).unwrap();

        // border
        assert_eq!(img.get_pixel(2, 2).0, [0, 0, 255]);
        assert_eq!(img.get_pixel(6, 5).0, [0, 0, 255]);
        assert_eq!(img.get_pixel(6, 3).0, [0, 0, 255]);
        // interior
        assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(5, 4).0, [255, 0, 0]);
        // outside
        assert_eq!(img.get_pixel(7, 3).0, WHITE);
        assert_eq!(img.get_pixel(3, 6).0, WHITE);
    }

    #[test]
    fn test_inverted_rectangle_matches_normalized() {
        let normal = Genome::from_shapes(vec![shape(1, 1, 8, 7, [10, 20, 30], [40, 50, 60])]);
        let inverted = Genome::from_shapes(vec![shape(8, 7, 1, 1, [10, 20, 30], [40, 50, 60])]);

        assert_eq!(
            render(&normal, 10, 10).unwrap(),
            render(&inverted, 10, 10).unwrap()
        );
    }

    #[test]
    fn test_later_shapes_paint_over_earlier_ones() {
        let a = shape(0, 0, 9, 9, [255, 0, 0], [255, 0, 0]);
        let b = shape(0, 0, 9, 9, [0, 255, 0], [0, 255, 0]);

        let img = render(&Genome::from_shapes(vec![a, b]), 10, 10).unwrap();
        assert!(img.pixels().all(|p| p.0 == [0, 255, 0]));

        let img = render(&Genome::from_shapes(vec![b, a]), 10, 10).unwrap();
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0]));
    }

    #[test]
    fn test_clips_to_canvas() {
        // x1/y1 on the canvas edge coordinate are one past the last pixel
        let genome = Genome::from_shapes(vec![shape(5, 5, 10, 10, [1, 2, 3], [9, 9, 9])]);
        let img = render(&genome, 10, 10).unwrap();

        assert_eq!(img.get_pixel(5, 5).0, [9, 9, 9]);
        assert_eq!(img.get_pixel(9, 9).0, [1, 2, 3]);
        assert_eq!(img.get_pixel(9, 5).0, [9, 9, 9]);

        let off_canvas = Genome::from_shapes(vec![shape(10, 10, 10, 10, [1, 2, 3], [9, 9, 9])]);
        let img = render(&off_canvas, 10, 10).unwrap();
        assert!(img.pixels().all(|p| p.0 == WHITE));
    }

    #[test]
    fn test_custom_background() {
        let renderer = Renderer::with_background(Canvas::new(4, 4).unwrap(), [0, 0, 0]);
        let img = renderer.render(&Genome::default());
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_render_is_deterministic() {
        use crate::engines::generation::genome::random_genome;
        use crate::types::ShapeCountBounds;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let canvas = Canvas::new(64, 48).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let genome = random_genome(&canvas, ShapeCountBounds::default(), &mut rng);
        let renderer = Renderer::new(canvas);

        assert_eq!(renderer.render(&genome), renderer.render(&genome));
    }
}
