//! Timed bombs and blast footprints
//!
//! A bomb is Armed until its fuse runs out, then Detonating for the blast
//! duration, then Spent. The footprint is computed exactly once, at the
//! Armed -> Detonating edge, by walking four rays through the grid.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::Direction;
use super::grid::{Grid, TileType};
use crate::consts::{BLAST_DURATION, BOMB_FRAME_TIME, BOMB_FRAMES, FUSE_TIME};

/// Lifecycle of a bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombPhase {
    /// Fuse burning
    Armed,
    /// Blast footprint active
    Detonating,
    /// Finished; removed by the round loop
    Spent,
}

/// A placed bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    /// Tile-aligned top-left pixel
    pub pos: IVec2,
    /// Edge length in pixels; also the ray step
    pub size: i32,
    /// Tiles reached along each ray
    pub range: u32,
    pub fuse_time: f32,
    pub blast_duration: f32,
    pub phase: BombPhase,
    timer: f32,
    blast_timer: f32,
    footprint: Vec<IVec2>,
    /// One-shot guard for the detonation notification
    pub effect_applied: bool,
    /// Idle animation frame while armed
    pub anim_frame: u32,
    frame_time: f32,
}

impl Bomb {
    pub fn new(id: u32, pos: IVec2, size: i32, range: u32) -> Self {
        Self {
            id,
            pos,
            size,
            range,
            fuse_time: FUSE_TIME,
            blast_duration: BLAST_DURATION,
            phase: BombPhase::Armed,
            timer: 0.0,
            blast_timer: 0.0,
            footprint: Vec::new(),
            effect_applied: false,
            anim_frame: 0,
            frame_time: 0.0,
        }
    }

    /// Advance timers. Returns true on the frame the bomb starts detonating.
    ///
    /// `grid` is only read; without one every ray runs its full range.
    pub fn tick(&mut self, dt: f32, grid: Option<&Grid>) -> bool {
        match self.phase {
            BombPhase::Spent => false,
            BombPhase::Armed => {
                self.timer += dt;
                self.frame_time += dt;
                if self.frame_time >= BOMB_FRAME_TIME {
                    self.frame_time = 0.0;
                    self.anim_frame = (self.anim_frame + 1) % BOMB_FRAMES;
                }

                if self.timer >= self.fuse_time {
                    self.phase = BombPhase::Detonating;
                    self.timer = 0.0;
                    self.anim_frame = 0;
                    self.footprint = self.compute_footprint(grid);
                    true
                } else {
                    false
                }
            }
            BombPhase::Detonating => {
                self.blast_timer += dt;
                if self.blast_timer >= self.blast_duration {
                    self.phase = BombPhase::Spent;
                }
                false
            }
        }
    }

    /// Cross-shaped blast: the centre cell plus up to `range` cells per ray.
    ///
    /// A ray stops before a hard or border wall and stops after scorching the
    /// first soft wall it meets.
    pub fn compute_footprint(&self, grid: Option<&Grid>) -> Vec<IVec2> {
        let mut cells = Vec::with_capacity(1 + 4 * self.range as usize);
        cells.push(self.pos);

        for dir in [Direction::Right, Direction::Left, Direction::Down, Direction::Up] {
            for step in 1..=self.range as i32 {
                let cell = self.pos + dir.offset() * self.size * step;
                let Some(grid) = grid else {
                    cells.push(cell);
                    continue;
                };
                match grid.tile_at_pixel(cell) {
                    TileType::HardWall | TileType::BorderWall => break,
                    TileType::SoftWall => {
                        cells.push(cell);
                        break;
                    }
                    TileType::Empty => cells.push(cell),
                }
            }
        }
        cells
    }

    pub fn footprint(&self) -> &[IVec2] {
        &self.footprint
    }

    pub fn is_armed(&self) -> bool {
        self.phase == BombPhase::Armed
    }

    pub fn is_detonating(&self) -> bool {
        self.phase == BombPhase::Detonating
    }

    pub fn is_spent(&self) -> bool {
        self.phase == BombPhase::Spent
    }

    /// Seconds until detonation (0 once detonating)
    pub fn fuse_remaining(&self) -> f32 {
        match self.phase {
            BombPhase::Armed => (self.fuse_time - self.timer).max(0.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROOM: &str = "
        BBBBB
        B...B
        BSHHB
        B...B
        BBBBB
    ";

    fn tile(col: i32, row: i32) -> IVec2 {
        IVec2::new(col * 40, row * 40)
    }

    #[test]
    fn test_phase_transitions() {
        let mut bomb = Bomb::new(1, tile(2, 2), 40, 1);
        assert!(!bomb.tick(1.0, None));
        assert!(bomb.is_armed());
        assert!(bomb.tick(1.0, None));
        assert!(bomb.is_detonating());
        assert_eq!(bomb.fuse_remaining(), 0.0);
        assert!(!bomb.tick(0.4, None));
        assert!(bomb.is_detonating());
        assert!(!bomb.tick(0.5, None));
        assert!(bomb.is_spent());
        // Spent is terminal
        assert!(!bomb.tick(10.0, None));
        assert!(bomb.is_spent());
    }

    #[test]
    fn test_footprint_without_grid_is_full_cross() {
        let mut bomb = Bomb::new(1, tile(2, 2), 40, 2);
        bomb.tick(FUSE_TIME, None);
        let fp = bomb.footprint();
        assert_eq!(fp.len(), 9);
        assert_eq!(fp[0], tile(2, 2));
        assert!(fp.contains(&tile(4, 2)));
        assert!(fp.contains(&tile(2, 0)));
    }

    #[test]
    fn test_footprint_blocked_by_walls() {
        // Hard wall at (row 2, col 3), soft wall at (row 2, col 1)
        let grid = Grid::parse(40, "BBBBB\nB...B\nBS.HB\nB...B\nBBBBB").unwrap();
        let mut bomb = Bomb::new(1, tile(2, 2), 40, 1);
        bomb.tick(FUSE_TIME, Some(&grid));
        let fp = bomb.footprint();
        assert!(fp.contains(&tile(2, 2)));
        assert!(fp.contains(&tile(1, 2)));
        assert!(!fp.contains(&tile(0, 2)));
        assert!(!fp.contains(&tile(3, 2)));
        assert!(fp.contains(&tile(2, 1)));
        assert!(fp.contains(&tile(2, 3)));
        assert_eq!(fp.len(), 4);
    }

    #[test]
    fn test_soft_wall_stops_ray_after_scorching() {
        let grid = Grid::parse(40, "BBBBBBB\nB.....B\nB.S...B\nB.....B\nBBBBBBB").unwrap();
        let bomb = Bomb::new(1, tile(2, 1), 40, 3);
        let fp = bomb.compute_footprint(Some(&grid));
        assert!(fp.contains(&tile(2, 2)));
        assert!(!fp.contains(&tile(2, 3)));
        // Border stops the upward ray without being added
        assert!(!fp.contains(&tile(2, 0)));
        // Rightward ray runs the full range through open floor
        assert!(fp.contains(&tile(5, 1)));
    }

    #[test]
    fn test_footprint_computed_once() {
        let mut grid = Grid::parse(40, ROOM).unwrap();
        let mut bomb = Bomb::new(1, tile(1, 1), 40, 1);
        bomb.tick(FUSE_TIME, Some(&grid));
        let before = bomb.footprint().to_vec();
        grid.set_tile(1, 2, TileType::HardWall);
        bomb.tick(0.1, Some(&grid));
        assert_eq!(bomb.footprint(), before.as_slice());
    }

    #[test]
    fn test_armed_animation_cycles() {
        let mut bomb = Bomb::new(1, tile(1, 1), 40, 1);
        for _ in 0..3 {
            bomb.tick(BOMB_FRAME_TIME, None);
        }
        assert_eq!(bomb.anim_frame, 0);
        bomb.tick(BOMB_FRAME_TIME, None);
        assert_eq!(bomb.anim_frame, 1);
    }

    proptest! {
        #[test]
        fn prop_rays_never_pass_solid_walls(seed in 0u64..500, range in 1u32..=5) {
            use rand::SeedableRng;
            let mut grid = Grid::initialize(800, 600).unwrap();
            grid.generate_layout(&mut rand_pcg::Pcg32::seed_from_u64(seed));
            let bomb = Bomb::new(1, tile(1, 1), grid.tile_size(), range);
            let fp = bomb.compute_footprint(Some(&grid));
            prop_assert_eq!(fp[0], tile(1, 1));
            for dir in Direction::ALL {
                let ray: Vec<IVec2> = fp[1..]
                    .iter()
                    .copied()
                    .filter(|c| {
                        let d = *c - bomb.pos;
                        d.x.signum() == dir.offset().x && d.y.signum() == dir.offset().y
                    })
                    .collect();
                prop_assert!(ray.len() as u32 <= range);
                for (i, cell) in ray.iter().enumerate() {
                    let t = grid.tile_at_pixel(*cell);
                    prop_assert!(t != TileType::HardWall && t != TileType::BorderWall);
                    if t == TileType::SoftWall {
                        prop_assert_eq!(i, ray.len() - 1);
                    }
                }
            }
        }
    }
}
