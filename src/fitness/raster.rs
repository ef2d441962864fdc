//! CPU triangle rasterization on tiny-skia.

use super::{Rasterizer, OPACITY};
use crate::genome::Polygon;
use tiny_skia as sk;

/// Software rasterizer.
///
/// Each call fills a fresh, explicitly sized pixmap owned by the
/// calling worker; nothing is cached between calls, so concurrent
/// evaluations never share a framebuffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuRasterizer {
    /// Enables edge anti-aliasing on polygon fills.
    pub anti_alias: bool,
}

impl Rasterizer for CpuRasterizer {
    fn render(&self, polygons: &[Polygon], width: u32, height: u32) -> Vec<u8> {
        let mut pix = sk::Pixmap::new(width, height).expect("non-zero pixmap dimensions");
        // Cleared opaque black background each call.
        pix.fill(sk::Color::BLACK);

        // Painter's algorithm: ascending weight, stable so equal weights
        // keep decode order.
        let mut ordered: Vec<&Polygon> = polygons.iter().collect();
        ordered.sort_by_key(|p| p.weight);

        for polygon in ordered {
            self.fill_polygon(&mut pix, polygon, width, height);
        }

        rgb_from_premultiplied(pix.data())
    }
}

impl CpuRasterizer {
    fn fill_polygon(&self, pix: &mut sk::Pixmap, polygon: &Polygon, width: u32, height: u32) {
        let mut pb = sk::PathBuilder::new();
        for (i, &(x, y)) in polygon.vertices.iter().enumerate() {
            let (px, py) = to_pixel(x, y, width, height);
            if i == 0 {
                pb.move_to(px, py);
            } else {
                pb.line_to(px, py);
            }
        }
        pb.close();
        let Some(path) = pb.finish() else {
            // Degenerate (collinear or coincident) vertices fill nothing.
            return;
        };

        let mut paint = sk::Paint::default();
        paint.anti_alias = self.anti_alias;
        let [r, g, b] = polygon.color;
        paint.set_color(
            sk::Color::from_rgba(r as f32, g as f32, b as f32, OPACITY as f32)
                .expect("decoded channels are in [0, 1]"),
        );

        pix.fill_path(
            &path,
            &paint,
            sk::FillRule::Winding,
            sk::Transform::identity(),
            None,
        );
    }
}

/// Maps clip-space coordinates to pixel coordinates.
///
/// The unit square `[-1, 1]²` covers the full frame with y up; vertex
/// magnitudes up to `ZOOM` overscan past the edges and get clipped by
/// the pixmap bounds.
fn to_pixel(x: f64, y: f64, width: u32, height: u32) -> (f32, f32) {
    let px = (x + 1.0) / 2.0 * f64::from(width);
    let py = (1.0 - y) / 2.0 * f64::from(height);
    (px as f32, py as f32)
}

/// Drops the alpha channel of a premultiplied RGBA buffer.
///
/// The background is opaque, and every composite over an opaque
/// destination stays opaque, so the premultiplied color bytes already
/// equal straight RGB.
fn rgb_from_premultiplied(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(weight: u32, color: [f64; 3]) -> Polygon {
        Polygon {
            weight,
            color,
            vertices: [(-1.0, -1.0), (1.0, -1.0), (0.0, 1.0)],
        }
    }

    #[test]
    fn test_empty_scene_is_black() {
        let buf = CpuRasterizer::default().render(&[], 8, 8);
        assert_eq!(buf.len(), 8 * 8 * 3);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_triangle_marks_pixels() {
        let buf = CpuRasterizer::default().render(&[triangle(0, [1.0, 1.0, 1.0])], 16, 16);
        assert!(buf.iter().any(|&b| b > 0), "filled triangle should touch pixels");
    }

    #[test]
    fn test_weight_orders_draw_calls() {
        // Two full-frame triangles: green has the higher weight and is
        // drawn last, so the final frame leans green regardless of list
        // order.
        let red = triangle(5, [1.0, 0.0, 0.0]);
        let green = triangle(6, [0.0, 1.0, 0.0]);
        let r = CpuRasterizer::default();

        let a = r.render(&[green.clone(), red.clone()], 8, 8);
        let b = r.render(&[red, green], 8, 8);
        assert_eq!(a, b, "draw order must come from weight, not list position");

        let center = ((4 * 8 + 4) * 3) as usize;
        assert!(
            a[center + 1] > a[center],
            "last-drawn green should dominate the center pixel"
        );
    }

    #[test]
    fn test_equal_weights_keep_decode_order() {
        let red = triangle(3, [1.0, 0.0, 0.0]);
        let green = triangle(3, [0.0, 1.0, 0.0]);
        let r = CpuRasterizer::default();

        let rg = r.render(&[red.clone(), green.clone()], 8, 8);
        let gr = r.render(&[green, red], 8, 8);
        // Tie-break preserves list order, so swapping the list swaps the
        // dominant channel.
        let center = ((4 * 8 + 4) * 3) as usize;
        assert!(rg[center + 1] > rg[center]);
        assert!(gr[center] > gr[center + 1]);
    }

    #[test]
    fn test_degenerate_triangle_renders_nothing() {
        let degenerate = Polygon {
            weight: 0,
            color: [1.0, 1.0, 1.0],
            vertices: [(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)],
        };
        let buf = CpuRasterizer::default().render(&[degenerate], 8, 8);
        assert!(buf.iter().all(|&b| b == 0));
    }
}
