//! Game state machine and frame loop
//!
//! `Game` owns the session, the word source and the timer queue. Input
//! events are queued as they arrive and processed in order at the start of
//! the next frame; the simulation then advances in fixed steps.
//!
//! Phase flow: Menu -> Playing -> GameOver | Cleared, with Start (or Confirm
//! on a results screen) beginning a fresh run and Cancel abandoning a run.

use std::collections::VecDeque;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{
    CharResult, GameEvent, GamePhase, GameSession, SubmitResult, TickInput, TimerEvent,
    TimerQueue, tick,
};
use crate::snapshot::Snapshot;
use crate::words::{WordBank, WordSource};

/// Movement key directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Abstract input consumed by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Movement key held or released
    Move { direction: Direction, pressed: bool },
    /// A typed glyph; non-alphabetic characters are ignored
    Char(char),
    /// Confirm the current word (or restart from a results screen)
    Confirm,
    Backspace,
    /// Abandon the current run
    Cancel,
    /// Start a run from the menu or a results screen
    Start,
    /// Deferred enemy respawn firing
    RespawnDue { generation: u64 },
}

/// Top-level controller
pub struct Game {
    session: GameSession,
    source: Box<dyn WordSource>,
    timers: TimerQueue,
    held: TickInput,
    pending: VecDeque<GameInput>,
    /// Seconds since the game was created
    clock: f64,
    accumulator: f32,
    max_substeps: u32,
}

impl Game {
    pub fn new(source: Box<dyn WordSource>, seed: u64) -> Self {
        Self {
            session: GameSession::new(seed),
            source,
            timers: TimerQueue::new(),
            held: TickInput::default(),
            pending: VecDeque::new(),
            clock: 0.0,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Game reading word files and tuning from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Seed {}", seed);
        let mut game = Self::new(Box::new(settings.word_source()), seed);
        game.max_substeps = settings.max_substeps.max(1);
        game
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Current game clock (seconds)
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Queue an input for the next frame
    pub fn push_input(&mut self, input: GameInput) {
        self.pending.push_back(input);
    }

    /// Run one frame: drain queued input, step the simulation, snapshot the result
    pub fn frame(&mut self, dt: f32) -> Snapshot {
        while let Some(input) = self.pending.pop_front() {
            self.handle_input(input);
        }

        // Clamp large frame gaps (e.g. after a stall)
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.clock += SIM_DT as f64;
            for event in self.timers.drain_due(self.clock) {
                match event {
                    TimerEvent::RespawnEnemy { generation } => {
                        self.handle_input(GameInput::RespawnDue { generation })
                    }
                }
            }

            tick(&mut self.session, &self.held, self.clock, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Time the cap couldn't simulate is dropped, not carried forward
        self.accumulator = self.accumulator.min(SIM_DT * self.max_substeps as f32);

        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, self.clock)
    }

    /// Take game events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// Apply one input immediately
    pub fn handle_input(&mut self, input: GameInput) {
        // Held keys are tracked in every phase so releases are never lost
        if let GameInput::Move { direction, pressed } = input {
            self.set_held(direction, pressed);
            return;
        }
        if let GameInput::RespawnDue { generation } = input {
            self.session.respawn_enemy(generation);
            return;
        }

        match self.session.phase {
            GamePhase::Menu => {
                if input == GameInput::Start {
                    self.reset_session();
                }
            }
            GamePhase::Playing => match input {
                GameInput::Char(c) if c.is_alphabetic() => self.on_char_typed(c),
                GameInput::Confirm => self.on_confirm_word(),
                GameInput::Backspace => self.session.typing.backspace(),
                GameInput::Cancel => {
                    self.timers.clear();
                    self.session.abandon();
                }
                _ => {}
            },
            GamePhase::GameOver | GamePhase::Cleared => {
                if matches!(input, GameInput::Start | GameInput::Confirm) {
                    self.reset_session();
                }
            }
        }
    }

    fn set_held(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.held.up = pressed,
            Direction::Down => self.held.down = pressed,
            Direction::Left => self.held.left = pressed,
            Direction::Right => self.held.right = pressed,
        }
    }

    /// Reload word lists and start a fresh run
    pub fn reset_session(&mut self) {
        let words = WordBank::load(self.source.as_ref());
        self.timers.clear();
        self.session.reset(words, self.clock);
    }

    fn on_char_typed(&mut self, c: char) {
        if self.session.typing.accept_char(c) == CharResult::Completed {
            self.on_confirm_word();
        }
    }

    /// Shared by typing the last letter and by explicit confirm
    fn on_confirm_word(&mut self) {
        match self.session.typing.submit() {
            SubmitResult::Correct { points } => {
                self.session.score += points;
                self.session.defeat_enemy();

                // A newer defeat pushes the respawn back
                self.timers
                    .cancel_matching(|e| matches!(e, TimerEvent::RespawnEnemy { .. }));

                if self.session.typing.target_reached() {
                    self.session.finish(GamePhase::Cleared, self.clock);
                    return;
                }

                self.timers.schedule(
                    self.clock + RESPAWN_DELAY_SECS,
                    TimerEvent::RespawnEnemy {
                        generation: self.session.generation,
                    },
                );
            }
            SubmitResult::Incorrect => {
                log::debug!("Missed {:?}", self.session.typing.target_word);
                self.session.push_event(GameEvent::WordMissed);
            }
        }
        self.session.next_word();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Entity;
    use crate::words::StaticWordSource;
    use glam::Vec2;
    use proptest::prelude::*;

    fn game() -> Game {
        let source = StaticWordSource::new(&["cat", "dog"], &["rabbit"], &["hippopotamus"]);
        Game::new(Box::new(source), 12345)
    }

    fn started() -> Game {
        let mut game = game();
        game.handle_input(GameInput::Start);
        game
    }

    fn type_word(game: &mut Game, word: &str) {
        for c in word.chars() {
            game.handle_input(GameInput::Char(c));
        }
    }

    fn type_target(game: &mut Game) {
        let word = game.session().typing.target_word.clone();
        type_word(game, &word);
    }

    /// Fill in the whole target word and press Confirm
    fn confirm_target(game: &mut Game) {
        let word = game.session().typing.target_word.clone();
        type_word(game, &word[..word.len() - 1]);
        game.session_mut().typing.typed = word;
        game.handle_input(GameInput::Confirm);
    }

    /// Run whole frames until `secs` of game time have passed
    fn run_for(game: &mut Game, secs: f64) {
        let end = game.clock() + secs;
        while game.clock() < end {
            game.frame(SIM_DT);
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::Menu);

        game.handle_input(GameInput::Confirm);
        game.handle_input(GameInput::Char('c'));
        assert_eq!(game.phase(), GamePhase::Menu);

        game.handle_input(GameInput::Start);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.session().enemy.is_some());
        assert_eq!(game.session().start_time, game.clock());
    }

    #[test]
    fn test_typing_word_defeats_enemy() {
        let mut game = game();
        game.push_input(GameInput::Start);
        let word = {
            game.frame(0.0);
            game.session().typing.target_word.clone()
        };
        for c in word.chars() {
            game.push_input(GameInput::Char(c));
        }
        let snap = game.frame(0.0);

        assert_eq!(snap.words_correct, 1);
        assert_eq!(snap.score, word.len() as u64);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(snap.enemy.is_none());
        assert_eq!(snap.effects.len(), 1);
        assert_eq!(game.timers().len(), 1);
        assert_eq!(game.timers().next_due(), Some(game.clock() + RESPAWN_DELAY_SECS));
    }

    #[test]
    fn test_auto_complete_matches_confirm() {
        let mut typed = started();
        type_target(&mut typed);

        let mut confirmed = started();
        let word = confirmed.session().typing.target_word.clone();
        // Type all but the last letter, restore it, then confirm
        type_word(&mut confirmed, &word[..word.len() - 1]);
        confirmed.session_mut().typing.typed = word.clone();
        confirmed.handle_input(GameInput::Confirm);

        for game in [&typed, &confirmed] {
            let s = game.session();
            assert_eq!(s.score, word.len() as u64);
            assert_eq!(s.typing.words_correct, 1);
            assert_eq!(s.typing.words_attempted, 1);
            assert!(s.enemy.is_none());
            assert_eq!(s.effects.len(), 1);
            assert_eq!(game.timers().len(), 1);
        }
    }

    #[test]
    fn test_wrong_confirm_skips_word() {
        let mut game = started();
        game.handle_input(GameInput::Char('z'));
        game.handle_input(GameInput::Confirm);

        let s = game.session();
        assert_eq!(s.typing.words_attempted, 1);
        assert_eq!(s.typing.words_correct, 0);
        assert_eq!(s.score, 0);
        assert!(s.enemy.is_some());
        assert!(game.timers().is_empty());
        assert!(game.session().events().contains(&GameEvent::WordMissed));
    }

    #[test]
    fn test_non_alphabetic_ignored() {
        let mut game = started();
        game.handle_input(GameInput::Char('1'));
        game.handle_input(GameInput::Char(' '));
        assert!(game.session().typing.typed.is_empty());
    }

    #[test]
    fn test_backspace() {
        let mut game = started();
        let first = game.session().typing.target_word.chars().next().unwrap();
        game.handle_input(GameInput::Char(first));
        game.handle_input(GameInput::Backspace);
        assert!(game.session().typing.typed.is_empty());
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut game = started();
        type_target(&mut game);
        assert!(game.session().enemy.is_none());

        run_for(&mut game, RESPAWN_DELAY_SECS - 0.1);
        assert!(game.session().enemy.is_none());

        run_for(&mut game, 0.2);
        assert!(game.session().enemy.is_some());
        assert!(game.timers().is_empty());
    }

    #[test]
    fn test_stale_respawn_ignored_after_reset() {
        let mut game = started();
        let old_generation = game.session().generation;
        type_target(&mut game);

        game.handle_input(GameInput::Cancel);
        assert_eq!(game.phase(), GamePhase::Menu);
        game.handle_input(GameInput::Start);
        game.session_mut().enemy = None;

        game.handle_input(GameInput::RespawnDue {
            generation: old_generation,
        });
        assert!(game.session().enemy.is_none());
    }

    #[test]
    fn test_cancel_discards_run() {
        let mut game = started();
        type_target(&mut game);
        game.handle_input(GameInput::Cancel);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.timers().is_empty());

        game.handle_input(GameInput::Start);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.session().typing.words_correct, 0);
        assert!(game.session().effects.is_empty());
    }

    #[test]
    fn test_cancel_only_while_playing() {
        let mut game = game();
        game.handle_input(GameInput::Cancel);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.session().generation, 0);
    }

    #[test]
    fn test_fifteen_words_clears() {
        let mut game = started();
        for i in 0..TARGET_WORDS {
            if i % 2 == 0 {
                type_target(&mut game);
            } else {
                let word = game.session().typing.target_word.clone();
                game.session_mut().typing.typed = word;
                game.handle_input(GameInput::Confirm);
            }
        }

        let s = game.session();
        assert_eq!(s.phase, GamePhase::Cleared);
        assert_eq!(s.typing.words_correct, TARGET_WORDS);
        assert_eq!(s.end_time, Some(game.clock()));
        assert!(game.timers().is_empty());
        let clears = s.events().iter().filter(|e| **e == GameEvent::Cleared).count();
        assert_eq!(clears, 1);

        // Results screen ignores typing
        game.handle_input(GameInput::Char('c'));
        assert_eq!(game.session().typing.words_correct, TARGET_WORDS);
    }

    #[test]
    fn test_fifteenth_word_confirmed_clears() {
        let mut game = started();
        for _ in 0..TARGET_WORDS - 1 {
            type_target(&mut game);
        }
        assert_eq!(game.phase(), GamePhase::Playing);
        confirm_target(&mut game);

        let s = game.session();
        assert_eq!(s.phase, GamePhase::Cleared);
        assert_eq!(s.typing.words_correct, TARGET_WORDS);
        assert_eq!(s.end_time, Some(game.clock()));
        assert!(game.timers().is_empty());
        let clears = s.events().iter().filter(|e| **e == GameEvent::Cleared).count();
        assert_eq!(clears, 1);

        game.handle_input(GameInput::Confirm);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.session().typing.words_correct, 0);
    }

    #[test]
    fn test_words_during_respawn_gap_still_leave_effects() {
        let mut game = started();
        type_target(&mut game);
        let first = game.session().effects.iter().next().unwrap().origin;
        type_target(&mut game);

        let s = game.session();
        assert!(s.enemy.is_none());
        assert_eq!(s.typing.words_correct, 2);
        assert_eq!(s.effects.len(), 2);
        assert!(s.effects.iter().all(|e| e.origin == first));
        assert_eq!(game.timers().len(), 1);
    }

    #[test]
    fn test_tier_progression() {
        let mut game = started();
        for _ in 0..5 {
            type_target(&mut game);
        }
        assert_eq!(game.session().typing.target_word, "rabbit");
        for _ in 0..5 {
            type_target(&mut game);
        }
        assert_eq!(game.session().typing.target_word, "hippopotamus");
    }

    #[test]
    fn test_collision_from_last_health_is_game_over() {
        let mut game = started();
        game.frame(1.0);
        {
            let session = game.session_mut();
            session.health = 1;
            session.player.pos = Vec2::new(400.0, 300.0);
            session.enemy = Some(Entity::enemy(Vec2::new(400.0, 310.0), Vec2::new(0.0, 1.0)));
        }

        let snap = game.frame(SIM_DT);
        assert_eq!(snap.health, 0);
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(snap.results.is_some());

        let end = game.session().end_time;
        run_for(&mut game, 1.0);
        assert_eq!(game.session().end_time, end);
    }

    #[test]
    fn test_restart_from_results() {
        let mut game = started();
        game.session_mut().finish(GamePhase::GameOver, 1.0);
        let generation = game.session().generation;

        game.handle_input(GameInput::Confirm);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.session().generation, generation + 1);
        assert_eq!(game.session().health, STARTING_HEALTH);
        assert_eq!(game.session().end_time, None);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut game = started();
        let start = game.session().player.pos;
        game.push_input(GameInput::Move {
            direction: Direction::Left,
            pressed: true,
        });
        game.frame(SIM_DT);
        assert_eq!(game.session().player.pos, start - Vec2::new(PLAYER_SPEED, 0.0));

        game.push_input(GameInput::Move {
            direction: Direction::Left,
            pressed: false,
        });
        game.frame(SIM_DT);
        assert_eq!(game.session().player.pos, start - Vec2::new(PLAYER_SPEED, 0.0));
    }

    #[test]
    fn test_key_release_tracked_in_menu() {
        let mut game = game();
        game.handle_input(GameInput::Move {
            direction: Direction::Up,
            pressed: true,
        });
        game.handle_input(GameInput::Move {
            direction: Direction::Up,
            pressed: false,
        });
        game.handle_input(GameInput::Start);
        let start = game.session().player.pos;
        game.frame(SIM_DT);
        assert_eq!(game.session().player.pos, start);
    }

    #[test]
    fn test_frame_substep_cap() {
        let mut game = started();
        let before = game.clock();
        game.frame(1.0);
        // 0.1s clamp, at most MAX_SUBSTEPS ticks
        let advanced = game.clock() - before;
        assert!(advanced <= MAX_SUBSTEPS as f64 * SIM_DT as f64 + 1e-9);
        assert!(advanced > 0.0);
    }

    #[test]
    fn test_accumulator_bounded_by_substep_cap() {
        let mut game = started();
        game.max_substeps = 1;
        for _ in 0..200 {
            game.frame(1.0 / 60.0);
            assert!(game.accumulator <= SIM_DT + 1e-6);
        }
        // One step per frame, no backlog
        let before = game.clock();
        game.frame(1.0 / 60.0);
        assert!((game.clock() - before - SIM_DT as f64).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_auto_complete_matches_confirm(
            short in prop::collection::vec("[a-z]{1,5}", 1..4),
            medium in prop::collection::vec("[a-z]{6,10}", 1..4),
            long in prop::collection::vec("[a-z]{11,15}", 1..4),
            seed in any::<u64>(),
            rounds in 1u32..=TARGET_WORDS,
        ) {
            let source = StaticWordSource::new(&short, &medium, &long);
            let mut typed = Game::new(Box::new(source.clone()), seed);
            let mut confirmed = Game::new(Box::new(source), seed);
            typed.handle_input(GameInput::Start);
            confirmed.handle_input(GameInput::Start);

            for _ in 0..rounds {
                prop_assert_eq!(
                    &typed.session().typing.target_word,
                    &confirmed.session().typing.target_word
                );
                type_target(&mut typed);
                confirm_target(&mut confirmed);

                prop_assert_eq!(typed.snapshot(), confirmed.snapshot());
                prop_assert_eq!(typed.session().events(), confirmed.session().events());
                prop_assert_eq!(typed.timers().len(), confirmed.timers().len());
                prop_assert_eq!(typed.timers().next_due(), confirmed.timers().next_due());
            }
        }
    }
}
