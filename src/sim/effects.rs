//! Transient death effects
//!
//! Purely visual: nothing here feeds back into gameplay. An effect fades and
//! sinks over its lifetime while its particles fly outward; the pool drops
//! the effect once its time is up.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::from_polar;

/// A single spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub size: f32,
    /// Seconds left before the particle stops drawing
    pub life: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// The fading remains of a defeated enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub origin: Vec2,
    pub elapsed: f32,
    pub duration: f32,
    pub particles: Vec<Particle>,
}

impl Effect {
    /// 0.0 at spawn, 1.0 once the lifetime is over
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }

    /// Opacity, fading linearly to zero
    pub fn alpha(&self) -> f32 {
        (1.0 - self.progress()).max(0.0)
    }

    /// Where the faded body is drawn; sinks as the effect ages
    pub fn anchor(&self) -> Vec2 {
        self.origin + Vec2::new(0.0, self.progress() * DEATH_EFFECT_DRIFT)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
    }
}

/// Live effects in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectPool {
    effects: Vec<Effect>,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst of particles at `origin`, each with a random direction and speed
    pub fn spawn_death_effect<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        let particles = (0..DEATH_PARTICLES)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(PARTICLE_SPEED_MIN..=PARTICLE_SPEED_MAX);
                Particle {
                    pos: origin,
                    vel: from_polar(speed * TICK_RATE, angle),
                    size: rng.random_range(PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MAX),
                    life: PARTICLE_LIFE_TICKS * SIM_DT,
                }
            })
            .collect();

        self.effects.push(Effect {
            origin,
            elapsed: 0.0,
            duration: DEATH_EFFECT_SECS,
            particles,
        });
    }

    /// Age every effect and its particles by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for effect in &mut self.effects {
            effect.update(dt);
        }
    }

    /// Drop effects whose lifetime is over
    pub fn prune_finished(&mut self) {
        self.effects.retain(|e| !e.is_finished());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
