//! Pixel-buffer difference scoring.

use super::ImageComparator;

/// Normalized mean-square error over all channels.
///
/// Every channel difference is normalized to `[0, 1]` and squared, then
/// averaged, so identical buffers score `0.0` and a full black/white
/// inversion scores `1.0`. Squaring weights large local errors more
/// heavily than diffuse small ones, which suits a painter's-algorithm
/// search that refines big shapes first.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanSquareComparator;

impl ImageComparator for MeanSquareComparator {
    fn difference(&self, a: &[u8], b: &[u8]) -> f64 {
        assert_eq!(a.len(), b.len(), "buffers must have equal size");
        if a.is_empty() {
            return 0.0;
        }

        let sum: f64 = a
            .iter()
            .zip(b)
            .map(|(&x, &y)| {
                let d = (f64::from(x) - f64::from(y)) / 255.0;
                d * d
            })
            .sum();
        sum / a.len() as f64
    }
}

// ============================================================================
// Tests
// ============================================================================
