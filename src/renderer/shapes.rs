//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;
use super::{Colour, Rect};

/// Two triangles covering `rect`, in pixel coordinates.
///
/// Empty or negative-size rectangles produce no vertices.
pub fn rect(rect: Rect, colour: Colour) -> Vec<Vertex> {
    if rect.w <= 0 || rect.h <= 0 {
        return Vec::new();
    }

    let min = Vec2::new(rect.x as f32, rect.y as f32);
    let max = min + Vec2::new(rect.w as f32, rect.h as f32);

    [
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, min.y),
        max,
    ]
    .into_iter()
    .map(|corner| Vertex::new(corner, colour))
    .collect()
}

/// Map a pixel position (origin top-left, y down) to normalized device coordinates
pub fn pixel_to_ndc(pos: Vec2, viewport: (u32, u32)) -> Vec2 {
    let (w, h) = viewport;
    let w = (w.max(1)) as f32;
    let h = (h.max(1)) as f32;
    Vec2::new(pos.x / w * 2.0 - 1.0, 1.0 - pos.y / h * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_has_two_triangles() {
        let verts = rect(Rect::new(10, 20, 30, 40), Colour::WHITE);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [10.0, 20.0]);
        assert_eq!(verts[5].position, [40.0, 60.0]);
        assert_eq!(verts[0].color, [1.0; 4]);
    }

    #[test]
    fn test_degenerate_rect_is_empty() {
        assert!(rect(Rect::new(0, 0, 0, 10), Colour::WHITE).is_empty());
        assert!(rect(Rect::new(0, 0, 10, -1), Colour::WHITE).is_empty());
    }

    #[test]
    fn test_pixel_to_ndc_corners() {
        let viewport = (200, 100);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(Vec2::new(200.0, 100.0), viewport), Vec2::new(1.0, -1.0));
        assert_eq!(pixel_to_ndc(Vec2::new(100.0, 50.0), viewport), Vec2::ZERO);
    }
}
