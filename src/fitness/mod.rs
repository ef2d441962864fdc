//! Fitness evaluation: decode → rasterize → compare.
//!
//! The evolutionary core treats rendering and image comparison as
//! black-box services behind the [`Rasterizer`] and [`ImageComparator`]
//! traits. [`PixelEvaluator`] composes them with the genome decoder
//! into the single [`Evaluator`] entry point the engine calls.
//!
//! Evaluation is a pure function of `(genome, target)` with no shared
//! mutable state across individuals, so the engine may run it in
//! parallel across a worker pool; every implementation must be
//! `Send + Sync`.

mod compare;
mod raster;

pub use compare::MeanSquareComparator;
pub use raster::CpuRasterizer;

use crate::error::EvoError;
use crate::genome::{self, BitString, Polygon};

/// Fixed translucency applied to every rendered polygon.
pub const OPACITY: f64 = 0.7;

/// Turns a decoded polygon list into pixel data.
///
/// Implementations must draw polygons in ascending weight order (ties
/// keep list order), each with the fixed [`OPACITY`], compositing over
/// a cleared background on every call. Output is packed RGB, 8 bits per
/// channel, row-major.
pub trait Rasterizer: Send + Sync {
    fn render(&self, polygons: &[Polygon], width: u32, height: u32) -> Vec<u8>;
}

/// Scores the difference of two equal-sized pixel buffers.
///
/// Returns a normalized error in `[0.0, 1.0]`, `0.0` meaning identical.
pub trait ImageComparator: Send + Sync {
    fn difference(&self, a: &[u8], b: &[u8]) -> f64;
}

/// Computes one individual's fitness from its genome.
///
/// Fitness is a scalar in `[0.0, 1.0]`, higher is better, `1.0` a
/// perfect match with the target.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, genome: &BitString, polygon_count: usize) -> Result<f64, EvoError>;
}

/// The production evaluator: decodes the genome, renders it, and scores
/// the rendering against the fixed target image.
pub struct PixelEvaluator<R, C> {
    rasterizer: R,
    comparator: C,
    target: Vec<u8>,
    width: u32,
    height: u32,
}

impl<R: Rasterizer, C: ImageComparator> PixelEvaluator<R, C> {
    /// Builds an evaluator over a packed RGB8 target buffer.
    pub fn new(rasterizer: R, comparator: C, target: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(target.len(), (width * height * 3) as usize);
        Self {
            rasterizer,
            comparator,
            target,
            width,
            height,
        }
    }

    /// Target image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Renders a genome at the target's dimensions, e.g. for snapshots.
    pub fn render(&self, genome: &BitString, polygon_count: usize) -> Result<Vec<u8>, EvoError> {
        let polygons = genome::decode(genome, polygon_count)?;
        Ok(self.rasterizer.render(&polygons, self.width, self.height))
    }
}

impl<R: Rasterizer, C: ImageComparator> Evaluator for PixelEvaluator<R, C> {
    fn evaluate(&self, genome: &BitString, polygon_count: usize) -> Result<f64, EvoError> {
        let rendered = self.render(genome, polygon_count)?;
        let error = self.comparator.difference(&rendered, &self.target);
        Ok(1.0 - error)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::POLYGON_BITS;
    use crate::random::seeded_rng;

    #[test]
    fn test_pixel_evaluator_is_in_unit_range() {
        let mut rng = seeded_rng(42);
        let target = vec![128u8; 16 * 16 * 3];
        let eval = PixelEvaluator::new(
            CpuRasterizer::default(),
            MeanSquareComparator,
            target,
            16,
            16,
        );
        for polygons in [1usize, 3] {
            let genome = BitString::random(polygons * POLYGON_BITS, &mut rng);
            let fitness = eval.evaluate(&genome, polygons).unwrap();
            assert!((0.0..=1.0).contains(&fitness), "fitness {fitness} out of range");
        }
    }

    #[test]
    fn test_pixel_evaluator_rejects_malformed_genome() {
        let eval = PixelEvaluator::new(
            CpuRasterizer::default(),
            MeanSquareComparator,
            vec![0u8; 8 * 8 * 3],
            8,
            8,
        );
        let genome = BitString::new(vec![false; POLYGON_BITS + 1]);
        assert!(matches!(
            eval.evaluate(&genome, 1),
            Err(EvoError::MalformedGenome { .. })
        ));
    }

    #[test]
    fn test_black_target_and_empty_scene_match_perfectly() {
        let eval = PixelEvaluator::new(
            CpuRasterizer::default(),
            MeanSquareComparator,
            vec![0u8; 8 * 8 * 3],
            8,
            8,
        );
        // Zero polygons render the cleared background only.
        let genome = BitString::new(Vec::new());
        let fitness = eval.evaluate(&genome, 0).unwrap();
        assert!((fitness - 1.0).abs() < 1e-12);
    }
}
