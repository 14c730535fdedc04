//! Fixed timestep simulation tick
//!
//! Order within a tick: player movement, enemy movement, collision against
//! the enemy's new position, then effect aging.

use glam::Vec2;

use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Per-tick player displacement; diagonals are scaled to axial speed
    pub fn movement(&self, speed: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= speed;
        }
        if self.down {
            delta.y += speed;
        }
        if self.left {
            delta.x -= speed;
        }
        if self.right {
            delta.x += speed;
        }

        if delta.x != 0.0 && delta.y != 0.0 {
            delta *= DIAGONAL_SCALE;
        }
        delta
    }
}

/// Advance the session by one fixed step
///
/// `now` is the game clock at the end of this step; `dt` the step length in seconds.
pub fn tick(session: &mut GameSession, input: &TickInput, now: f64, dt: f32) {
    // Effects keep fading on the results and menu screens
    if session.phase != GamePhase::Playing {
        age_effects(session, dt);
        return;
    }

    let delta = input.movement(session.player.speed);
    session.player.move_player(delta, &session.bounds);

    let bounds = session.bounds;
    let hit = match session.enemy.as_mut() {
        Some(enemy) => {
            enemy.move_enemy(&bounds);
            session.player.collides_with(enemy)
        }
        None => false,
    };
    if hit && !session.is_invincible(now) {
        session.on_collision(now);
    }

    age_effects(session, dt);
}

fn age_effects(session: &mut GameSession, dt: f32) {
    session.effects.update(dt);
    session.effects.prune_finished();
}
