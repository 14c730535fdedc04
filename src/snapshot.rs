//! Render-facing view of a session
//!
//! Plain data, serializable, with everything a renderer or HUD needs and
//! nothing it could use to mutate the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameSession, ResultStats};
use crate::words::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    /// Centre of the fading body
    pub anchor: Vec2,
    /// 1.0 = opaque, 0.0 = gone
    pub alpha: f32,
    /// Only particles still alive
    pub particles: Vec<ParticleView>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: BodyView,
    pub enemy: Option<BodyView>,
    pub health: u8,
    pub invincible: bool,
    pub score: u64,
    pub target_word: String,
    pub typed: String,
    pub tier: Tier,
    pub words_correct: u32,
    pub words_attempted: u32,
    pub target_word_count: u32,
    /// Drives the shrinking progress bar
    pub remaining_fraction: f32,
    pub elapsed_secs: f64,
    pub effects: Vec<EffectView>,
    /// Filled in once the run has ended
    pub results: Option<ResultStats>,
}

impl Snapshot {
    pub fn capture(session: &GameSession, now: f64) -> Self {
        let body = |pos: Vec2, radius: f32| BodyView { pos, radius };
        let effects = session
            .effects
            .iter()
            .map(|effect| EffectView {
                anchor: effect.anchor(),
                alpha: effect.alpha(),
                particles: effect
                    .particles
                    .iter()
                    .filter(|p| p.is_alive())
                    .map(|p| ParticleView {
                        pos: p.pos,
                        size: p.size,
                    })
                    .collect(),
            })
            .collect();

        Self {
            phase: session.phase,
            player: body(session.player.pos, session.player.radius),
            enemy: session.enemy.as_ref().map(|e| body(e.pos, e.radius)),
            health: session.health,
            invincible: session.is_invincible(now),
            score: session.score,
            target_word: session.typing.target_word.clone(),
            typed: session.typing.typed.clone(),
            tier: session.typing.tier,
            words_correct: session.typing.words_correct,
            words_attempted: session.typing.words_attempted,
            target_word_count: session.typing.target_word_count,
            remaining_fraction: session.typing.remaining_fraction(),
            elapsed_secs: session.elapsed(now),
            effects,
            results: session
                .phase
                .is_finished()
                .then(|| session.stats(now)),
        }
    }
}
