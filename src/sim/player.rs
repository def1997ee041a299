//! Player actor: key-driven movement with diagonal speed normalisation

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::actor::{Body, Direction};
use crate::consts::{PLAYER_FRAME_TIME, PLAYER_FRAMES, PLAYER_SIZE};

/// Held directional keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Summed axis vector; opposite keys cancel
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }

    fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Pixels per second
    pub speed: f32,
    pub facing: Direction,
    pub intent: MoveIntent,
    pub anim_frame: u32,
    frame_time: f32,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE, PLAYER_SIZE),
            speed,
            facing: Direction::Down,
            intent: MoveIntent::default(),
            anim_frame: 0,
            frame_time: 0.0,
        }
    }

    /// Apply a key press or release. Presses also turn the sprite.
    pub fn apply_input(&mut self, dir: Direction, pressed: bool) {
        self.intent.set(dir, pressed);
        if pressed {
            self.facing = dir;
        }
    }

    /// Release every held key (used when a round ends)
    pub fn clear_input(&mut self) {
        self.intent = MoveIntent::default();
    }

    /// Move by intent x speed x dt and clamp to `bounds` (map size in pixels).
    ///
    /// Tile collision is not checked here; the round loop snapshots the
    /// position and reverts the whole move if the grid reports an overlap.
    pub fn advance(&mut self, dt: f32, bounds: IVec2) {
        let mut dir = self.intent.axis();
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= std::f32::consts::FRAC_1_SQRT_2;
        }

        self.body.pos += dir * self.speed * dt;
        self.body.clamp_to(bounds);

        if dir != Vec2::ZERO {
            self.frame_time += dt;
            if self.frame_time > PLAYER_FRAME_TIME {
                self.frame_time = 0.0;
                self.anim_frame = (self.anim_frame + 1) % PLAYER_FRAMES;
            }
        } else {
            self.anim_frame = 0;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.intent.axis() != Vec2::ZERO
    }
}
