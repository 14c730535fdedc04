//! Moving, collidable circular actors
//!
//! The player is driven by input and clamped to the playfield; the enemy
//! follows its own heading and reflects off the walls.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, circles_overlap, reflect_axis};
use crate::consts::*;

/// What drives an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    /// Moved by held direction keys
    Player,
    /// Moves on its own along a unit heading
    Enemy { heading: Vec2 },
}

/// A circular actor on the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    pub role: Role,
}

impl Entity {
    /// A player at `pos`
    pub fn player(pos: Vec2) -> Self {
        Self {
            pos,
            radius: ENTITY_RADIUS,
            speed: PLAYER_SPEED,
            role: Role::Player,
        }
    }

    /// An enemy at `pos`; `heading` is normalized (falls back to +x if zero)
    pub fn enemy(pos: Vec2, heading: Vec2) -> Self {
        Self {
            pos,
            radius: ENTITY_RADIUS,
            speed: ENEMY_SPEED,
            role: Role::Enemy {
                heading: heading.try_normalize().unwrap_or(Vec2::X),
            },
        }
    }

    /// Random direction from independent uniform components in [-1, 1]
    pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
        let raw = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
        raw.try_normalize().unwrap_or(Vec2::X)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    /// Enemy heading, if this is an enemy
    pub fn heading(&self) -> Option<Vec2> {
        match self.role {
            Role::Enemy { heading } => Some(heading),
            Role::Player => None,
        }
    }

    /// Move by `delta` and clamp inside the playfield
    ///
    /// Callers scale diagonal deltas by [`DIAGONAL_SCALE`] beforehand.
    pub fn move_player(&mut self, delta: Vec2, bounds: &Bounds) {
        self.pos = bounds.clamp_circle(self.pos + delta, self.radius);
    }

    /// Advance along the heading, reflecting off walls on each axis independently
    pub fn move_enemy(&mut self, bounds: &Bounds) {
        let Role::Enemy { heading } = self.role else {
            return;
        };

        let (x, hx) = reflect_axis(self.pos.x, heading.x, self.speed, self.radius, bounds.width);
        let (y, hy) = reflect_axis(self.pos.y, heading.y, self.speed, self.radius, bounds.height);

        self.pos = Vec2::new(x, y);
        self.role = Role::Enemy {
            heading: Vec2::new(hx, hy),
        };
    }

    /// True if the bodies overlap (touching is not a collision)
    pub fn collides_with(&self, other: &Entity) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }
}
