//! Bomb Arena - a tile-based bomb arena simulation
//!
//! Core modules:
//! - `sim`: Frame simulation (grid, bombs, actors, round loop)
//! - `game`: Screen state machine that owns settings, high score and the round
//! - `settings`: Tunables supplied before a round starts
//! - `audio`: Sound cues derived from simulation events
//! - `renderer`: Read-only scene extraction for a drawing backend

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ArenaError, Result};
pub use game::{Game, MenuAction, Screen};
pub use highscores::HighScores;
pub use settings::{OptionKind, Settings};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Grid sizing
    pub const TARGET_COLUMNS: i32 = 20;
    pub const MIN_TILE_SIZE: i32 = 20;
    pub const FALLBACK_TILE_SIZE: i32 = 40;

    /// Round timer (seconds)
    pub const ROUND_TIME: f32 = 180.0;

    /// Bomb timings (seconds)
    pub const FUSE_TIME: f32 = 2.0;
    pub const BLAST_DURATION: f32 = 0.8;
    pub const BOMB_FRAME_TIME: f32 = 0.2;
    pub const BOMB_FRAMES: u32 = 3;

    /// Scoring
    pub const SOFT_WALL_POINTS: u64 = 50;
    pub const ENEMY_POINTS: u64 = 500;
    pub const TIME_BONUS_PER_SECOND: u64 = 20;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 25;
    pub const PLAYER_FRAME_TIME: f32 = 0.15;
    pub const PLAYER_FRAMES: u32 = 4;

    /// Enemy defaults (box size is one tile)
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ENEMY_TURN_COOLDOWN: f32 = 2.0;
    pub const ENEMY_TURN_RETRIES: u32 = 8;
    pub const ENEMY_SPAWN_ATTEMPTS: u32 = 100;
}

/// Tile (column, row) containing a pixel, flooring toward negative infinity
#[inline]
pub fn pixel_to_tile(pixel: IVec2, tile_size: i32) -> IVec2 {
    IVec2::new(pixel.x.div_euclid(tile_size), pixel.y.div_euclid(tile_size))
}

/// Top-left pixel of a tile given as (column, row)
#[inline]
pub fn tile_to_pixel(tile: IVec2, tile_size: i32) -> IVec2 {
    tile * tile_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_tile_floors_negative() {
        assert_eq!(pixel_to_tile(IVec2::new(79, 40), 40), IVec2::new(1, 1));
        assert_eq!(pixel_to_tile(IVec2::new(-1, 0), 40), IVec2::new(-1, 0));
    }

    #[test]
    fn test_tile_round_trip_aligns() {
        let p = tile_to_pixel(pixel_to_tile(IVec2::new(95, 130), 40), 40);
        assert_eq!(p, IVec2::new(80, 120));
    }
}
