//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle as two triangles
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle shrunk by `inset` on every side
pub fn inset_rect(min: Vec2, size: Vec2, inset: f32, color: [f32; 4]) -> [Vertex; 6] {
    let inset = inset.min(size.x / 2.0).min(size.y / 2.0);
    rect(min + Vec2::splat(inset), size - Vec2::splat(inset * 2.0), color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let quad = rect(Vec2::new(40.0, 80.0), Vec2::splat(40.0), [1.0; 4]);
        assert_eq!(quad[0].position, [40.0, 80.0]);
        assert_eq!(quad[5].position, [80.0, 120.0]);
    }

    #[test]
    fn test_inset_never_inverts() {
        let quad = inset_rect(Vec2::ZERO, Vec2::splat(10.0), 8.0, [1.0; 4]);
        assert_eq!(quad[0].position, [5.0, 5.0]);
        assert_eq!(quad[5].position, [5.0, 5.0]);
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 12).len(), 36);
    }
}
