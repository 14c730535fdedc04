//! Typed-input matching and word progression
//!
//! Only characters that extend a correct prefix are stored, so the typed
//! text can never diverge from the target word.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::TARGET_WORDS;
use crate::words::{Tier, WordBank};

/// Result of typing one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharResult {
    /// Wrong character (or word already complete); nothing stored
    Rejected,
    /// Stored, word not finished yet
    Partial,
    /// Stored, and the typed text now equals the target word
    Completed,
}

/// Result of confirming the current word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// Full word typed; worth `points`
    Correct { points: u64 },
    /// Word abandoned
    Incorrect,
}

/// The word being typed and the running counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingSession {
    pub target_word: String,
    pub typed: String,
    pub tier: Tier,
    pub words_attempted: u32,
    pub words_correct: u32,
    pub target_word_count: u32,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self {
            target_word: String::new(),
            typed: String::new(),
            tier: Tier::Short,
            words_attempted: 0,
            words_correct: 0,
            target_word_count: TARGET_WORDS,
        }
    }
}

impl TypingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next word for the current tier and clear the typed text
    pub fn begin_word<R: Rng + ?Sized>(&mut self, bank: &WordBank, rng: &mut R) {
        self.tier = Tier::for_correct_count(self.words_correct);
        self.target_word = bank.select_word(self.tier, rng);
        self.typed.clear();
    }

    /// Append `c` if it is the next character of the target word
    pub fn accept_char(&mut self, c: char) -> CharResult {
        let mut lower = c.to_lowercase();
        let (Some(c), None) = (lower.next(), lower.next()) else {
            return CharResult::Rejected;
        };

        if self.is_complete() {
            return CharResult::Rejected;
        }

        let expected = self.target_word.chars().nth(self.typed.chars().count());
        if expected != Some(c) {
            return CharResult::Rejected;
        }

        self.typed.push(c);
        if self.is_complete() {
            CharResult::Completed
        } else {
            CharResult::Partial
        }
    }

    /// Confirm the current word. Always counts as an attempt.
    ///
    /// Does not pick the next word; the caller does that unless the game
    /// has just been cleared.
    pub fn submit(&mut self) -> SubmitResult {
        self.words_attempted += 1;
        if self.is_complete() {
            self.words_correct += 1;
            SubmitResult::Correct {
                points: self.target_word.chars().count() as u64,
            }
        } else {
            SubmitResult::Incorrect
        }
    }

    /// Remove the last typed character, if any
    pub fn backspace(&mut self) {
        self.typed.pop();
    }

    /// True once the typed text equals the (non-empty) target
    pub fn is_complete(&self) -> bool {
        !self.target_word.is_empty() && self.typed == self.target_word
    }

    /// True once enough words have been typed to clear the game
    pub fn target_reached(&self) -> bool {
        self.words_correct >= self.target_word_count
    }

    /// Words still needed, as a fraction of the goal (1.0 at start)
    pub fn remaining_fraction(&self) -> f32 {
        let remaining = self.target_word_count.saturating_sub(self.words_correct);
        remaining as f32 / self.target_word_count.max(1) as f32
    }
}
