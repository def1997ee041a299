//! Round state and core simulation types
//!
//! Everything the frame loop reads or writes for one round lives here. The
//! grid, bomb list and enemy list are only mutated by `tick`.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bomb::Bomb;
use super::enemy::Enemy;
use super::grid::Grid;
use super::player::Player;
use crate::consts::ROUND_TIME;
use crate::error::Result;
use crate::settings::Settings;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Round timer reached zero
    TimeUp,
    /// Player touched a hostile
    CaughtByEnemy,
    /// Player stood in a blast
    CaughtInBlast,
    /// Every hostile eliminated with time left
    Victory,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        self == Outcome::Victory
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::TimeUp => "Time's up",
            Outcome::CaughtByEnemy => "Caught by an enemy",
            Outcome::CaughtInBlast => "Caught in a blast",
            Outcome::Victory => "You win",
        }
    }
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// Round ended; final score already computed
    Over(Outcome),
}

/// Notifications for audio and HUD collaborators, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BombPlaced { bomb_id: u32 },
    /// Fired once per bomb on the frame it detonates
    BombDetonated { bomb_id: u32 },
    WallsDestroyed { count: u32, points: u64 },
    EnemyEliminated { enemy_id: u32, points: u64 },
    RoundOver { outcome: Outcome, final_score: u64 },
}

/// Tunables fixed for the duration of a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Player speed in pixels per second
    pub player_speed: f32,
    pub enemy_count: u32,
    pub max_bombs: u32,
    pub blast_range: u32,
}

impl From<&Settings> for RoundConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            player_speed: settings.player_speed(),
            enemy_count: settings.enemy_count(),
            max_bombs: settings.max_bombs(),
            blast_range: settings.blast_range(),
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the layout, spawns and enemy turns were drawn from
    pub seed: u64,
    pub config: RoundConfig,
    pub grid: Grid,
    pub player: Player,
    /// Live hostiles
    pub enemies: Vec<Enemy>,
    /// Active bombs (armed or detonating)
    pub bombs: Vec<Bomb>,
    pub score: u64,
    /// Seconds left, floored at zero
    pub time_remaining: f32,
    pub phase: RoundPhase,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// First terminal condition seen this frame
    pub(crate) pending_outcome: Option<Outcome>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a round on a fresh random layout sized to the screen.
    pub fn new(
        config: RoundConfig,
        screen_width: i32,
        screen_height: i32,
        seed: u64,
    ) -> Result<Self> {
        let mut grid = Grid::initialize(screen_width, screen_height)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        grid.generate_layout(&mut rng);

        let mut state = Self::build(config, grid, seed, rng);
        state.spawn_enemies();
        Ok(state)
    }

    /// Start a round on a prepared grid with no enemies placed.
    pub fn with_grid(config: RoundConfig, grid: Grid, seed: u64) -> Self {
        Self::build(config, grid, seed, Pcg32::seed_from_u64(seed))
    }

    fn build(config: RoundConfig, grid: Grid, seed: u64, rng: Pcg32) -> Self {
        let ts = grid.tile_size() as f32;
        Self {
            seed,
            config,
            player: Player::new(Vec2::new(ts, ts), config.player_speed),
            grid,
            enemies: Vec::new(),
            bombs: Vec::new(),
            score: 0,
            time_remaining: ROUND_TIME,
            phase: RoundPhase::Playing,
            events: Vec::new(),
            pending_outcome: None,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Place `config.enemy_count` enemies on free tiles.
    ///
    /// Enemies without a free tile are dropped. If none could be placed at
    /// all, one more is tried at random and then at the far corner.
    pub fn spawn_enemies(&mut self) {
        let size = self.grid.tile_size();
        for i in 0..self.config.enemy_count {
            let id = self.next_entity_id();
            let mut enemy = Enemy::new(id, size, &mut self.rng);
            if enemy.find_safe_spawn(&self.grid, &mut self.rng) {
                self.enemies.push(enemy);
            } else {
                log::warn!("No position for enemy {}; enemy not created", i + 1);
            }
        }

        if self.enemies.is_empty() && self.config.enemy_count > 0 {
            log::info!("Fallback: placing at least one enemy");
            let id = self.next_entity_id();
            let mut enemy = Enemy::new(id, size, &mut self.rng);
            if enemy.find_safe_spawn(&self.grid, &mut self.rng) {
                self.enemies.push(enemy);
                return;
            }

            let far = self.far_corner();
            if !self.grid.is_colliding(far.x, far.y, size, size) {
                self.enemies.push(enemy.at(far));
            } else {
                log::error!("Could not place any enemy, even at the far corner");
            }
        }
    }

    /// Top-left pixel of the tile diagonally opposite the player spawn
    fn far_corner(&self) -> IVec2 {
        let ts = self.grid.tile_size();
        let mut x = (self.grid.columns() - 2) * ts;
        let mut y = (self.grid.rows() - 2) * ts;
        if x < ts && self.grid.columns() > 1 {
            x = ts;
        } else if x < 0 {
            x = 0;
        }
        if y < ts && self.grid.rows() > 1 {
            y = ts;
        } else if y < 0 {
            y = 0;
        }
        IVec2::new(x, y)
    }

    /// Record a terminal condition; the first one in a frame wins
    pub(crate) fn mark_terminal(&mut self, outcome: Outcome) {
        if self.pending_outcome.is_none() {
            self.pending_outcome = Some(outcome);
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            RoundPhase::Over(outcome) => Some(outcome),
            RoundPhase::Playing => None,
        }
    }

    /// Bombs whose fuse is still burning
    pub fn armed_bomb_count(&self) -> usize {
        self.bombs.iter().filter(|b| b.is_armed()).count()
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::TileType;

    #[test]
    fn test_new_round_setup() {
        let state = GameState::new(RoundConfig::default(), 800, 600, 1234).unwrap();
        assert_eq!(state.phase, RoundPhase::Playing);
        assert_eq!(state.time_remaining, ROUND_TIME);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.body.pos, Vec2::new(40.0, 40.0));
        assert_eq!(state.player.speed, 200.0);
        assert_eq!(state.enemies.len(), 3);
        for enemy in &state.enemies {
            let r = enemy.body.rect();
            assert!(!state.grid.is_colliding(r.x, r.y, r.w, r.h));
        }
    }

    #[test]
    fn test_new_round_rejects_tiny_screen() {
        assert!(GameState::new(RoundConfig::default(), 60, 40, 1).is_err());
    }

    #[test]
    fn test_fallback_enemy_at_far_corner() {
        // Interior beyond the outer two rings is all hard wall; far corner is open
        let grid = Grid::parse(
            40,
            "
            BBBBBBB
            B.....B
            B.HHH.B
            B.HHH.B
            B.....B
            BBBBBBB
            ",
        )
        .unwrap();
        let config = RoundConfig {
            enemy_count: 2,
            ..RoundConfig::default()
        };
        let mut state = GameState::with_grid(config, grid, 5);
        state.spawn_enemies();
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].body.pixel(), IVec2::new(200, 160));
    }

    #[test]
    fn test_no_enemy_when_nothing_is_free() {
        let mut grid = Grid::parse(40, "BBBBB\nB...B\nB...B\nB...B\nBBBBB").unwrap();
        grid.set_tile(2, 2, TileType::SoftWall);
        grid.set_tile(3, 3, TileType::SoftWall);
        let mut state = GameState::with_grid(RoundConfig::default(), grid, 5);
        state.spawn_enemies();
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_first_terminal_outcome_wins() {
        let grid = Grid::parse(40, "BBBB\nB..B\nB..B\nBBBB").unwrap();
        let mut state = GameState::with_grid(RoundConfig::default(), grid, 1);
        state.mark_terminal(Outcome::TimeUp);
        state.mark_terminal(Outcome::CaughtByEnemy);
        assert_eq!(state.pending_outcome, Some(Outcome::TimeUp));
    }
}
