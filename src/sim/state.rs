//! Game session state and core transitions
//!
//! One `GameSession` holds everything a run needs. It is owned by the frame
//! loop and only ever mutated from there.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::effects::EffectPool;
use super::entity::Entity;
use super::typing::TypingSession;
use crate::consts::*;
use crate::playfield_center;
use crate::words::WordBank;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Health ran out
    GameOver,
    /// Enough words typed
    Cleared,
}

impl GamePhase {
    /// Run has ended and is showing results
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Cleared)
    }
}

/// Notable things that happened, for sound and visual layers to drain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    /// Word finished; enemy removed at `pos`
    EnemyDefeated { pos: Vec2 },
    EnemyRespawned { pos: Vec2 },
    /// Confirmed a word that wasn't fully typed
    WordMissed,
    PlayerHit { health: u8 },
    GameOver,
    Cleared,
    /// Run abandoned back to the menu
    Abandoned,
}

/// Numbers for the results screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultStats {
    pub elapsed_secs: f64,
    pub words_per_minute: u32,
    pub accuracy_percent: u32,
}

/// Everything belonging to one run
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Bumped on every reset or abandon; stale timers carry an old value
    pub generation: u64,
    pub bounds: Bounds,
    pub player: Entity,
    /// Present exactly while an enemy is alive on screen
    pub enemy: Option<Entity>,
    /// Where the enemy was last seen; death effects land here while it is absent
    pub last_enemy_pos: Vec2,
    pub score: u64,
    pub health: u8,
    /// Game-clock time of the last hit taken
    pub last_hit: Option<f64>,
    pub invincibility_window: f64,
    pub start_time: f64,
    /// Set once, on the first transition into GameOver or Cleared
    pub end_time: Option<f64>,
    pub typing: TypingSession,
    pub effects: EffectPool,
    pub words: WordBank,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameSession {
    /// A session sitting on the menu
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            generation: 0,
            bounds: Bounds::default(),
            player: Entity::player(playfield_center()),
            enemy: None,
            last_enemy_pos: playfield_center(),
            score: 0,
            health: STARTING_HEALTH,
            last_hit: None,
            invincibility_window: INVINCIBILITY_SECS,
            start_time: 0.0,
            end_time: None,
            typing: TypingSession::new(),
            effects: EffectPool::new(),
            words: WordBank::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Move on to a fresh word for the current tier
    pub fn next_word(&mut self) {
        self.typing.begin_word(&self.words, &mut self.rng);
    }

    /// Start a fresh run with `words`, discarding everything from the last one
    pub fn reset(&mut self, words: WordBank, now: f64) {
        self.generation += 1;
        self.phase = GamePhase::Playing;
        self.words = words;
        self.player = Entity::player(playfield_center());
        self.enemy = None;
        self.score = 0;
        self.health = STARTING_HEALTH;
        self.last_hit = None;
        self.invincibility_window = INVINCIBILITY_SECS;
        self.start_time = now;
        self.end_time = None;
        self.effects.clear();
        self.typing = TypingSession::new();
        self.next_word();
        self.spawn_enemy();

        log::info!(
            "Session {} started, first word {:?}",
            self.generation,
            self.typing.target_word
        );
        self.events.push(GameEvent::SessionStarted);
    }

    /// Drop the current run and go back to the menu
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.phase = GamePhase::Menu;
        self.enemy = None;
        log::info!("Run abandoned, back to menu");
        self.events.push(GameEvent::Abandoned);
    }

    /// Place a new enemy somewhere clear of the player, heading anywhere
    pub fn spawn_enemy(&mut self) {
        let pos = self.enemy_spawn_point();
        let heading = Entity::random_heading(&mut self.rng);
        self.last_enemy_pos = pos;
        self.enemy = Some(Entity::enemy(pos, heading));
    }

    fn enemy_spawn_point(&mut self) -> Vec2 {
        let r = ENTITY_RADIUS;
        for _ in 0..32 {
            let candidate = Vec2::new(
                self.rng.random_range(r..=self.bounds.width - r),
                self.rng.random_range(r..=self.bounds.height - r),
            );
            if candidate.distance(self.player.pos) >= ENEMY_SPAWN_CLEARANCE {
                return candidate;
            }
        }
        // Corner farthest from the player
        let center = playfield_center();
        Vec2::new(
            if self.player.pos.x < center.x { self.bounds.width - r } else { r },
            if self.player.pos.y < center.y { self.bounds.height - r } else { r },
        )
    }

    /// Bring back an enemy if the timer belongs to this run and one is missing
    pub fn respawn_enemy(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != GamePhase::Playing || self.enemy.is_some()
        {
            log::debug!("Ignoring stale respawn (generation {})", generation);
            return false;
        }
        self.spawn_enemy();
        if let Some(enemy) = &self.enemy {
            log::debug!("Enemy respawned at {:?}", enemy.pos);
            self.events.push(GameEvent::EnemyRespawned { pos: enemy.pos });
        }
        true
    }

    /// Remove the enemy and leave a death effect where it stood
    ///
    /// With no enemy on screen the effect goes where the last one was.
    pub fn defeat_enemy(&mut self) -> Vec2 {
        if let Some(enemy) = self.enemy.take() {
            self.last_enemy_pos = enemy.pos;
        }
        let pos = self.last_enemy_pos;
        self.effects.spawn_death_effect(pos, &mut self.rng);
        log::debug!("Enemy defeated at {:?}", pos);
        self.events.push(GameEvent::EnemyDefeated { pos });
        pos
    }

    /// Within the invincibility window after the last hit
    pub fn is_invincible(&self, now: f64) -> bool {
        self.last_hit
            .is_some_and(|hit| now - hit < self.invincibility_window)
    }

    /// Apply a hit from the enemy, unless still invincible
    ///
    /// Returns true if the hit counted.
    pub fn on_collision(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::Playing || self.is_invincible(now) {
            return false;
        }

        self.health = self.health.saturating_sub(1);
        self.last_hit = Some(now);
        log::debug!("Player hit, health {}", self.health);
        self.events.push(GameEvent::PlayerHit {
            health: self.health,
        });

        if self.health == 0 {
            self.finish(GamePhase::GameOver, now);
        }
        true
    }

    /// Enter a results phase; the end time is only recorded the first time
    pub fn finish(&mut self, phase: GamePhase, now: f64) {
        debug_assert!(phase.is_finished());
        if self.phase.is_finished() {
            return;
        }
        self.phase = phase;
        if self.end_time.is_none() {
            self.end_time = Some(now);
        }

        log::info!(
            "{:?} after {:.1}s: score {}, {}/{} words",
            phase,
            self.elapsed(now),
            self.score,
            self.typing.words_correct,
            self.typing.target_word_count
        );
        self.events.push(match phase {
            GamePhase::Cleared => GameEvent::Cleared,
            _ => GameEvent::GameOver,
        });
    }

    /// Seconds since the run started, frozen once it ends
    pub fn elapsed(&self, now: f64) -> f64 {
        (self.end_time.unwrap_or(now) - self.start_time).max(0.0)
    }

    /// Words per minute and accuracy for the results screen
    pub fn stats(&self, now: f64) -> ResultStats {
        let elapsed_secs = self.elapsed(now);
        let minutes = elapsed_secs / 60.0;
        let correct = self.typing.words_correct as f64;
        let attempted = self.typing.words_attempted.max(1) as f64;
        ResultStats {
            elapsed_secs,
            words_per_minute: (correct / minutes.max(1.0)) as u32,
            accuracy_percent: (correct / attempted * 100.0) as u32,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
