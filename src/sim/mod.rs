//! Arena simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Randomness only through the round's seeded RNG
//! - Grid, bomb and enemy collections are written only by `tick`
//! - Stable iteration order (by insertion)

pub mod actor;
pub mod bomb;
pub mod collision;
pub mod enemy;
pub mod grid;
pub mod player;
pub mod state;
pub mod tick;

pub use actor::{Body, Direction};
pub use bomb::{Bomb, BombPhase};
pub use collision::{Rect, rect_hits_footprint};
pub use enemy::Enemy;
pub use grid::{Grid, TileType};
pub use player::{MoveIntent, Player};
pub use state::{GameEvent, GameState, Outcome, RoundConfig, RoundPhase};
pub use tick::{TickInput, place_bomb, tick};
