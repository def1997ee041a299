//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const FLOOR: [f32; 4] = [0.18, 0.42, 0.22, 1.0];
    pub const BORDER_WALL: [f32; 4] = [0.2, 0.2, 0.25, 1.0];
    pub const HARD_WALL: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    /// Soft walls alternate by (row + col) % 3
    pub const SOFT_WALL: [[f32; 4]; 3] = [
        [0.62, 0.42, 0.22, 1.0],
        [0.58, 0.38, 0.2, 1.0],
        [0.66, 0.46, 0.26, 1.0],
    ];
    pub const BOMB: [f32; 4] = [0.08, 0.08, 0.1, 1.0];
    pub const BOMB_FUSE: [f32; 4] = [1.0, 0.75, 0.2, 1.0];
    pub const BLAST: [f32; 4] = [1.0, 0.5, 0.1, 0.85];
    pub const ENEMY: [f32; 4] = [0.85, 0.2, 0.3, 1.0];
    pub const PLAYER: [f32; 4] = [0.95, 0.95, 1.0, 1.0];
}
