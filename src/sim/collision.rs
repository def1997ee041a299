//! Axis-aligned overlap tests between actors and blast cells

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square cell of `size` at a pixel position
    pub fn cell(at: IVec2, size: i32) -> Self {
        Self::new(at.x, at.y, size, size)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.y + self.h <= other.y
            || self.y >= other.y + other.h
            || self.x + self.w <= other.x
            || self.x >= other.x + other.w)
    }
}

/// Whether a box overlaps any cell of a blast footprint
pub fn rect_hits_footprint(rect: &Rect, footprint: &[IVec2], cell_size: i32) -> bool {
    footprint
        .iter()
        .any(|&cell| rect.overlaps(&Rect::cell(cell, cell_size)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 40, 40);
        assert!(a.overlaps(&Rect::new(39, 39, 10, 10)));
        assert!(a.overlaps(&Rect::new(10, 10, 5, 5)));
        assert!(!a.overlaps(&Rect::new(40, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 40, 10, 10)));
        assert!(!a.overlaps(&Rect::new(-10, 0, 10, 10)));
    }

    #[test]
    fn test_footprint_hit() {
        let footprint = [IVec2::new(80, 80), IVec2::new(120, 80)];
        assert!(rect_hits_footprint(&Rect::new(150, 90, 25, 25), &footprint, 40));
        assert!(!rect_hits_footprint(&Rect::new(160, 90, 25, 25), &footprint, 40));
        assert!(!rect_hits_footprint(&Rect::new(0, 0, 25, 25), &[], 40));
    }
}
