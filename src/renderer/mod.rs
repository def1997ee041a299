//! Scene extraction for a rendering backend
//!
//! Reads a round and emits colored triangles in screen pixels. Nothing here
//! writes back into the simulation.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, colors};

use crate::consts::PLAYER_FRAMES;
use crate::sim::{Bomb, GameState, Player, TileType};

const BOMB_SEGMENTS: u32 = 16;

/// Build the full frame: tiles, armed bombs, blast cells, enemies, player.
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let grid = &state.grid;
    let ts = grid.tile_size() as f32;
    let mut vertices = Vec::with_capacity((grid.rows() * grid.columns()) as usize * 6 + 256);

    for (row, col, tile) in grid.iter_tiles() {
        let color = match tile {
            TileType::Empty => colors::FLOOR,
            TileType::SoftWall => colors::SOFT_WALL[((row + col) % 3) as usize],
            TileType::HardWall => colors::HARD_WALL,
            TileType::BorderWall => colors::BORDER_WALL,
        };
        let min = Vec2::new(col as f32 * ts, row as f32 * ts);
        vertices.extend(shapes::rect(min, Vec2::splat(ts), color));
    }

    for bomb in state.bombs.iter().filter(|b| b.is_armed()) {
        let size = bomb.size as f32;
        let center = bomb.pos.as_vec2() + Vec2::splat(size / 2.0);
        vertices.extend(shapes::circle(center, size * 0.4, colors::BOMB, BOMB_SEGMENTS));
        // Fuse spark grows with the idle frame
        let spark = size * 0.1 * (1 + bomb_clip_index(bomb)) as f32;
        vertices.extend(shapes::rect(
            center - Vec2::splat(spark / 2.0),
            Vec2::splat(spark),
            colors::BOMB_FUSE,
        ));
    }

    for bomb in state.bombs.iter().filter(|b| b.is_detonating()) {
        let size = Vec2::splat(bomb.size as f32);
        for cell in bomb.footprint() {
            vertices.extend(shapes::rect(cell.as_vec2(), size, colors::BLAST));
        }
    }

    for enemy in &state.enemies {
        let r = enemy.body.rect();
        vertices.extend(shapes::inset_rect(
            Vec2::new(r.x as f32, r.y as f32),
            Vec2::new(r.w as f32, r.h as f32),
            2.0,
            colors::ENEMY,
        ));
    }

    let body = &state.player.body;
    vertices.extend(shapes::rect(
        body.pos,
        Vec2::new(body.width as f32, body.height as f32),
        colors::PLAYER,
    ));

    vertices
}

/// Sprite-sheet clip for the player: one row per facing, one column per frame
pub fn player_clip_index(player: &Player) -> usize {
    player.facing as usize * PLAYER_FRAMES as usize + player.anim_frame as usize
}

pub fn bomb_clip_index(bomb: &Bomb) -> usize {
    bomb.anim_frame as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Grid, RoundConfig, place_bomb};
    use glam::IVec2;

    fn state() -> GameState {
        let grid = Grid::parse(40, "BBBBB\nB.S.B\nB.H.B\nB...B\nBBBBB").unwrap();
        GameState::with_grid(RoundConfig::default(), grid, 1)
    }

    #[test]
    fn test_tiles_then_player() {
        let state = state();
        let scene = build_scene(&state);
        assert_eq!(scene.len(), 25 * 6 + 6);
        // First tile is the top-left border
        assert_eq!(scene[0].color, colors::BORDER_WALL);
        // Soft wall at row 1, col 2
        assert_eq!(scene[7 * 6].color, colors::SOFT_WALL[0]);
        let player = &scene[scene.len() - 6..];
        assert!(player.iter().all(|v| v.color == colors::PLAYER));
        assert_eq!(player[0].position, [40.0, 40.0]);
    }

    #[test]
    fn test_blast_cells_drawn_while_detonating() {
        let mut state = state();
        assert!(place_bomb(&mut state));
        let armed = build_scene(&state);
        assert!(armed.iter().any(|v| v.color == colors::BOMB));
        assert!(!armed.iter().any(|v| v.color == colors::BLAST));

        let grid = state.grid.clone();
        state.bombs[0].tick(2.0, Some(&grid));
        let blast = build_scene(&state);
        let cells = blast.iter().filter(|v| v.color == colors::BLAST).count() / 6;
        assert_eq!(cells, state.bombs[0].footprint().len());
        assert!(!blast.iter().any(|v| v.color == colors::BOMB));
    }

    #[test]
    fn test_clip_indices() {
        let mut state = state();
        state.player.facing = Direction::Left;
        state.player.anim_frame = 3;
        assert_eq!(player_clip_index(&state.player), 2 * 4 + 3);

        let bomb = Bomb::new(1, IVec2::new(40, 40), 40, 1);
        assert_eq!(bomb_clip_index(&bomb), 0);
    }
}
