//! Per-frame round update
//!
//! Advances one round by a single frame. The order of the steps matters:
//! player movement, then hostile movement, then bomb resolution, with a
//! terminal check after each movement and bomb stage so one frame never
//! produces two outcomes.

use glam::IVec2;

use super::actor::Direction;
use super::bomb::Bomb;
use super::collision::rect_hits_footprint;
use super::state::{GameEvent, GameState, Outcome, RoundPhase};
use crate::consts::*;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional key edges in arrival order; `true` is a press
    pub keys: Vec<(Direction, bool)>,
    /// Place a bomb under the player
    pub place_bomb: bool,
}

impl TickInput {
    pub fn press(mut self, dir: Direction) -> Self {
        self.keys.push((dir, true));
        self
    }

    pub fn release(mut self, dir: Direction) -> Self {
        self.keys.push((dir, false));
        self
    }
}

/// Advance the round by `dt` seconds. Does nothing once the round is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_over() {
        return;
    }

    for &(dir, pressed) in &input.keys {
        state.player.apply_input(dir, pressed);
    }
    if input.place_bomb {
        place_bomb(state);
    }

    state.time_remaining -= dt;
    if state.time_remaining <= 0.0 {
        state.time_remaining = 0.0;
        state.mark_terminal(Outcome::TimeUp);
    }

    move_player(state, dt);
    move_enemies(state, dt);
    if state.pending_outcome.is_some() {
        finish_round(state);
        return;
    }

    resolve_bombs(state, dt);
    if state.pending_outcome.is_some() {
        finish_round(state);
        return;
    }

    if state.enemies.is_empty() && state.time_remaining > 0.0 {
        state.mark_terminal(Outcome::Victory);
        finish_round(state);
    }
}

/// Drop a bomb on the tile under the player's centre.
///
/// Rejected when the armed-bomb cap is reached or a live bomb already sits
/// on that tile. Returns whether a bomb was placed.
pub fn place_bomb(state: &mut GameState) -> bool {
    if state.is_over() {
        return false;
    }
    if state.armed_bomb_count() >= state.config.max_bombs as usize {
        log::debug!("Bomb cap of {} reached", state.config.max_bombs);
        return false;
    }

    let ts = state.grid.tile_size();
    let body = &state.player.body;
    let centre = body.pixel() + IVec2::new(body.width / 2, body.height / 2);
    let cell = crate::tile_to_pixel(crate::pixel_to_tile(centre, ts), ts);

    if state.bombs.iter().any(|b| !b.is_spent() && b.pos == cell) {
        return false;
    }

    let id = state.next_entity_id();
    state
        .bombs
        .push(Bomb::new(id, cell, ts, state.config.blast_range));
    state.events.push(GameEvent::BombPlaced { bomb_id: id });
    true
}

fn move_player(state: &mut GameState, dt: f32) {
    let prev = state.player.body.pos;
    state.player.advance(dt, state.grid.pixel_size());
    let r = state.player.body.rect();
    if state.grid.is_colliding(r.x, r.y, r.w, r.h) {
        state.player.body.pos = prev;
    }
}

fn move_enemies(state: &mut GameState, dt: f32) {
    let player = state.player.body.rect();
    let mut caught = false;
    for enemy in state.enemies.iter_mut() {
        enemy.advance(dt, &state.grid, &mut state.rng);
        if enemy.body.rect().overlaps(&player) {
            caught = true;
            break;
        }
    }
    if caught {
        state.mark_terminal(Outcome::CaughtByEnemy);
    }
}

fn resolve_bombs(state: &mut GameState, dt: f32) {
    let ts = state.grid.tile_size();
    let player = state.player.body.rect();

    for bomb in state.bombs.iter_mut() {
        if bomb.tick(dt, Some(&state.grid)) && !bomb.effect_applied {
            bomb.effect_applied = true;
            state.events.push(GameEvent::BombDetonated { bomb_id: bomb.id });
        }
        if !bomb.is_detonating() {
            continue;
        }

        let footprint = bomb.footprint();
        let destroyed = state.grid.apply_blast(footprint);
        if destroyed > 0 {
            let points = destroyed as u64 * SOFT_WALL_POINTS;
            state.score += points;
            state.events.push(GameEvent::WallsDestroyed {
                count: destroyed,
                points,
            });
        }

        if rect_hits_footprint(&player, footprint, ts) {
            state.pending_outcome.get_or_insert(Outcome::CaughtInBlast);
            break;
        }

        let mut eliminated = Vec::new();
        state.enemies.retain(|enemy| {
            let hit = rect_hits_footprint(&enemy.body.rect(), footprint, ts);
            if hit {
                eliminated.push(enemy.id);
            }
            !hit
        });
        for enemy_id in eliminated {
            state.score += ENEMY_POINTS;
            state.events.push(GameEvent::EnemyEliminated {
                enemy_id,
                points: ENEMY_POINTS,
            });
        }
    }

    state.bombs.retain(|b| !b.is_spent());
}

fn finish_round(state: &mut GameState) {
    let Some(outcome) = state.pending_outcome.take() else {
        return;
    };

    if outcome.is_win() {
        let bonus = state.time_remaining.floor() as u64 * TIME_BONUS_PER_SECOND;
        state.score += bonus;
        log::info!("Time bonus: {bonus}");
    }

    state.phase = RoundPhase::Over(outcome);
    state.player.clear_input();
    state.events.push(GameEvent::RoundOver {
        outcome,
        final_score: state.score,
    });
    log::info!("Round over: {} (score {})", outcome.as_str(), state.score);
}
