//! Shared actor pieces: facing direction and bounding body

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Cardinal direction. Discriminants double as sprite-sheet row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    #[default]
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Uniform random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Position and bounding box of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub width: i32,
    pub height: i32,
}

impl Body {
    pub fn new(pos: Vec2, width: i32, height: i32) -> Self {
        Self { pos, width, height }
    }

    /// Integer pixel position used for grid queries
    pub fn pixel(&self) -> IVec2 {
        IVec2::new(self.pos.x.floor() as i32, self.pos.y.floor() as i32)
    }

    pub fn rect(&self) -> Rect {
        let p = self.pixel();
        Rect::new(p.x, p.y, self.width, self.height)
    }

    /// Keep the box inside `[0, bounds - size]` on both axes.
    ///
    /// Returns true if either axis had to be clamped.
    pub fn clamp_to(&mut self, bounds: IVec2) -> bool {
        let max_x = (bounds.x - self.width).max(0) as f32;
        let max_y = (bounds.y - self.height).max(0) as f32;
        let clamped = Vec2::new(self.pos.x.clamp(0.0, max_x), self.pos.y.clamp(0.0, max_y));
        let changed = clamped != self.pos;
        self.pos = clamped;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sprite_rows() {
        assert_eq!(Direction::Up as u32, 0);
        assert_eq!(Direction::Down as u32, 1);
        assert_eq!(Direction::Left as u32, 2);
        assert_eq!(Direction::Right as u32, 3);
    }

    #[test]
    fn test_body_clamp() {
        let mut body = Body::new(Vec2::new(-5.0, 590.0), 25, 25);
        assert!(body.clamp_to(IVec2::new(800, 600)));
        assert_eq!(body.pos, Vec2::new(0.0, 575.0));
        assert!(!body.clamp_to(IVec2::new(800, 600)));
    }

    #[test]
    fn test_body_rect_floors() {
        let body = Body::new(Vec2::new(40.9, 41.2), 25, 25);
        assert_eq!(body.rect(), Rect::new(40, 41, 25, 25));
    }
}
