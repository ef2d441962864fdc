//! Polygon bit-field layout and genome decoding.
//!
//! Each polygon occupies a strict fixed-width slice of the genome:
//!
//! | field      | bits                          | decoded as                     |
//! |------------|-------------------------------|--------------------------------|
//! | weight     | [`WEIGHT_BITS`]               | unsigned draw-order key        |
//! | color      | 3 × [`CHANNEL_BITS`]          | channels normalized to `[0,1]` |
//! | vertices   | 3 × 2 × [`COORD_BITS`]        | signed, `[-ZOOM, ZOOM]`        |
//!
//! Decoding is pure and stateless: polygons are derived from the genome
//! on demand and never stored back.

use crate::error::EvoError;
use crate::genome::BitString;

/// Vertices per polygon (triangles).
pub const VERTEX_COUNT: usize = 3;

/// Bits encoding the draw-order weight.
pub const WEIGHT_BITS: usize = 3;

/// Bits per primary color channel.
pub const CHANNEL_BITS: usize = 2;

/// Bits for the full RGB color.
pub const COLOR_BITS: usize = 3 * CHANNEL_BITS;

/// Bits per vertex coordinate, sign bit included.
pub const COORD_BITS: usize = 5;

/// Total bits per polygon field.
pub const POLYGON_BITS: usize = WEIGHT_BITS + COLOR_BITS + VERTEX_COUNT * 2 * COORD_BITS;

/// Coordinate magnitude bound: vertices decode into `[-ZOOM, ZOOM]`.
///
/// Slightly larger than the unit clip square so triangles can extend
/// past the visible edge.
pub const ZOOM: f64 = 1.3;

/// One decoded polygon descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Draw-order key. Lower weight is drawn first; equal weights keep
    /// decode order so rendering stays deterministic.
    pub weight: u32,
    /// RGB color, each channel in `[0.0, 1.0]`.
    pub color: [f64; 3],
    /// Vertex coordinates, each in `[-ZOOM, ZOOM]`.
    pub vertices: [(f64, f64); VERTEX_COUNT],
}

/// Decodes a genome into its ordered polygon list.
///
/// Requires `genome.len() == POLYGON_BITS * polygon_count`; anything
/// else is a [`EvoError::MalformedGenome`] and indicates a bug in the
/// growth bookkeeping. Safe to call concurrently on the same genome.
pub fn decode(genome: &BitString, polygon_count: usize) -> Result<Vec<Polygon>, EvoError> {
    let expected = POLYGON_BITS * polygon_count;
    if genome.len() != expected {
        return Err(EvoError::MalformedGenome {
            expected,
            actual: genome.len(),
            polygons: polygon_count,
        });
    }

    let polygons = genome
        .bits()
        .chunks_exact(POLYGON_BITS)
        .map(decode_field)
        .collect();
    Ok(polygons)
}

fn decode_field(field: &[bool]) -> Polygon {
    let mut offset = 0;
    let mut take = |n: usize| {
        let slice = &field[offset..offset + n];
        offset += n;
        slice
    };

    let weight = field_value(take(WEIGHT_BITS));

    let mut color = [0.0; 3];
    for channel in &mut color {
        *channel = normalized(take(CHANNEL_BITS));
    }

    let mut vertices = [(0.0, 0.0); VERTEX_COUNT];
    for vertex in &mut vertices {
        let x = signed_normalized(take(COORD_BITS), ZOOM);
        let y = signed_normalized(take(COORD_BITS), ZOOM);
        *vertex = (x, y);
    }

    Polygon {
        weight,
        color,
        vertices,
    }
}

/// Big-endian unsigned value of a bit slice.
fn field_value(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u32::from(b))
}

/// Normalizes a bit slice to `[0.0, 1.0]`.
fn normalized(bits: &[bool]) -> f64 {
    let max = (1u32 << bits.len()) - 1;
    f64::from(field_value(bits)) / f64::from(max)
}

/// Sign-bit decode: first bit selects sign, remaining bits normalize to
/// `[0, zoom]`, giving the final range `[-zoom, zoom]`.
fn signed_normalized(bits: &[bool], zoom: f64) -> f64 {
    let sign = if bits[0] { -1.0 } else { 1.0 };
    sign * zoom * normalized(&bits[1..])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn test_polygon_bits_layout() {
        // 3 weight + 6 color + 30 vertex bits
        assert_eq!(POLYGON_BITS, 39);
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let genome = BitString::new(vec![false; POLYGON_BITS]);
        let err = decode(&genome, 2);
        assert!(matches!(
            err,
            Err(EvoError::MalformedGenome {
                expected,
                actual,
                polygons: 2,
            }) if expected == 2 * POLYGON_BITS && actual == POLYGON_BITS
        ));
    }

    #[test]
    fn test_all_zero_genome_decodes_to_extremes() {
        let genome = BitString::new(vec![false; POLYGON_BITS * 2]);
        let polys = decode(&genome, 2).unwrap();
        assert_eq!(polys.len(), 2);
        for p in &polys {
            assert_eq!(p.weight, 0);
            assert_eq!(p.color, [0.0; 3]);
            // Sign bit 0 is positive, magnitude bits 0 give 0.0.
            for &(x, y) in &p.vertices {
                assert_eq!(x, 0.0);
                assert_eq!(y, 0.0);
            }
        }
    }

    #[test]
    fn test_all_one_genome_decodes_to_negative_extreme() {
        let genome = BitString::new(vec![true; POLYGON_BITS]);
        let polys = decode(&genome, 1).unwrap();
        let p = &polys[0];
        assert_eq!(p.weight, 7);
        assert_eq!(p.color, [1.0; 3]);
        // Sign bit 1 with full magnitude: the negative-normalized extreme.
        for &(x, y) in &p.vertices {
            assert!((x + ZOOM).abs() < 1e-12);
            assert!((y + ZOOM).abs() < 1e-12);
        }
    }

    #[test]
    fn test_decode_is_pure() {
        let mut rng = seeded_rng(42);
        let genome = BitString::random(POLYGON_BITS * 5, &mut rng);
        let a = decode(&genome, 5).unwrap();
        let b = decode(&genome, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_field_value_is_big_endian() {
        assert_eq!(field_value(&[true, false, true]), 5);
        assert_eq!(field_value(&[false, true, true]), 3);
    }

    #[test]
    fn test_signed_normalized_range() {
        // 5-bit coordinate: sign + 4 magnitude bits.
        let max_pos = signed_normalized(&[false, true, true, true, true], ZOOM);
        let max_neg = signed_normalized(&[true, true, true, true, true], ZOOM);
        assert!((max_pos - ZOOM).abs() < 1e-12);
        assert!((max_neg + ZOOM).abs() < 1e-12);
    }
}
