//! Hostile actors: randomized wandering with collision-triggered turns

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Body, Direction};
use super::grid::Grid;
use crate::consts::{ENEMY_SPAWN_ATTEMPTS, ENEMY_SPEED, ENEMY_TURN_COOLDOWN, ENEMY_TURN_RETRIES};

/// A wandering hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// Pixels per second; displacement is truncated to whole pixels each frame
    pub speed: f32,
    pub direction: Direction,
    turn_timer: f32,
    pub turn_cooldown: f32,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(id: u32, size: i32, rng: &mut R) -> Self {
        Self {
            id,
            body: Body::new(Vec2::ZERO, size, size),
            speed: ENEMY_SPEED,
            direction: Direction::random(rng),
            turn_timer: 0.0,
            turn_cooldown: ENEMY_TURN_COOLDOWN,
        }
    }

    /// Place at an exact pixel position
    pub fn at(mut self, pos: IVec2) -> Self {
        self.body.pos = pos.as_vec2();
        self
    }

    /// Pick a new direction, preferring one different from the current.
    ///
    /// Up to `ENEMY_TURN_RETRIES` draws are made; the last draw is kept even
    /// if it repeats.
    pub fn change_direction<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut next = Direction::random(rng);
        let mut attempts = 1;
        while next == self.direction && attempts < ENEMY_TURN_RETRIES {
            next = Direction::random(rng);
            attempts += 1;
        }
        self.direction = next;
    }

    /// One frame of wandering.
    ///
    /// Turns on a cooldown, moves a whole number of pixels along the current
    /// direction, and on hitting a wall or the map edge steps back and turns.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, grid: &Grid, rng: &mut R) {
        self.turn_timer += dt;
        if self.turn_timer >= self.turn_cooldown {
            self.change_direction(rng);
            self.turn_timer = 0.0;
        }

        let prev = self.body.pos;
        let step = (self.speed * dt) as i32;
        self.body.pos += (self.direction.offset() * step).as_vec2();

        let p = self.body.pixel();
        if grid.is_colliding(p.x, p.y, self.body.width, self.body.height) {
            self.body.pos = prev;
            self.change_direction(rng);
        }

        if self.body.clamp_to(grid.pixel_size()) {
            self.change_direction(rng);
        }
    }

    /// Move to a random collision-free interior tile.
    ///
    /// Samples tiles away from the outer two rings. Returns false if no free
    /// tile turned up within `ENEMY_SPAWN_ATTEMPTS` draws; the position is
    /// left unchanged in that case.
    pub fn find_safe_spawn<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        let (rows, cols) = (grid.rows(), grid.columns());
        if rows <= 4 || cols <= 4 {
            log::warn!("Grid {rows}x{cols} has no tiles inside the outer two rings");
            return false;
        }

        let ts = grid.tile_size();
        for _ in 0..ENEMY_SPAWN_ATTEMPTS {
            let col = rng.random_range(2..cols - 2);
            let row = rng.random_range(2..rows - 2);
            let (x, y) = (col * ts, row * ts);
            if !grid.is_colliding(x, y, self.body.width, self.body.height) {
                self.body.pos = Vec2::new(x as f32, y as f32);
                return true;
            }
        }

        log::warn!(
            "No safe spawn for enemy {} after {} attempts",
            self.id,
            ENEMY_SPAWN_ATTEMPTS
        );
        false
    }
}
