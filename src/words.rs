//! Difficulty-tiered word lists
//!
//! Words come from a [`WordSource`], one list per [`Tier`]. Sources never
//! fail: a missing or unreadable list degrades to a small built-in list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::{LONG_TIER_AT, MEDIUM_TIER_AT};

/// Returned when a tier's list is empty
pub const FALLBACK_WORD: &str = "fallback";

/// Used in place of a list that could not be read
pub const FALLBACK_WORDS: [&str; 10] = [
    "python",
    "pygame",
    "programming",
    "keyboard",
    "computer",
    "algorithm",
    "function",
    "variable",
    "developer",
    "software",
];

/// Word difficulty bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    /// 3-5 letters
    #[default]
    Short,
    /// 6-10 letters
    Medium,
    /// 11-15 letters
    Long,
}

impl Tier {
    /// Tier for a given number of correctly typed words
    pub fn for_correct_count(words_correct: u32) -> Self {
        if words_correct < MEDIUM_TIER_AT {
            Tier::Short
        } else if words_correct < LONG_TIER_AT {
            Tier::Medium
        } else {
            Tier::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Short => "short",
            Tier::Medium => "medium",
            Tier::Long => "long",
        }
    }
}

/// Something that can hand out the candidate words for a tier
pub trait WordSource {
    /// Candidate words for `tier`. Order is irrelevant.
    fn load(&self, tier: Tier) -> Vec<String>;
}

/// Reads one plain-text file per tier, one word per line
#[derive(Debug, Clone)]
pub struct FileWordSource {
    dir: PathBuf,
    short_file: String,
    medium_file: String,
    long_file: String,
}

impl FileWordSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            short_file: "words_short.txt".to_string(),
            medium_file: "words_medium.txt".to_string(),
            long_file: "words_long.txt".to_string(),
        }
    }

    /// Override the file names used for each tier
    pub fn with_files(mut self, short: &str, medium: &str, long: &str) -> Self {
        self.short_file = short.to_string();
        self.medium_file = medium.to_string();
        self.long_file = long.to_string();
        self
    }

    pub fn path_for(&self, tier: Tier) -> PathBuf {
        let name = match tier {
            Tier::Short => &self.short_file,
            Tier::Medium => &self.medium_file,
            Tier::Long => &self.long_file,
        };
        self.dir.join(name)
    }

    fn read_words(path: &Path) -> io::Result<Vec<String>> {
        let text = fs::read_to_string(path)?;
        Ok(parse_word_list(&text))
    }
}

impl WordSource for FileWordSource {
    fn load(&self, tier: Tier) -> Vec<String> {
        let path = self.path_for(tier);
        match Self::read_words(&path) {
            Ok(words) => {
                log::debug!(
                    "Loaded {} {} words from {}",
                    words.len(),
                    tier.as_str(),
                    path.display()
                );
                words
            }
            Err(e) => {
                log::warn!(
                    "Word list {} unavailable ({}), using the built-in list",
                    path.display(),
                    e
                );
                fallback_words()
            }
        }
    }
}

/// In-memory word lists
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    pub short: Vec<String>,
    pub medium: Vec<String>,
    pub long: Vec<String>,
}

impl StaticWordSource {
    pub fn new<S: AsRef<str>>(short: &[S], medium: &[S], long: &[S]) -> Self {
        let owned = |words: &[S]| -> Vec<String> {
            words.iter().map(|w| w.as_ref().to_string()).collect()
        };
        Self {
            short: owned(short),
            medium: owned(medium),
            long: owned(long),
        }
    }
}

impl WordSource for StaticWordSource {
    fn load(&self, tier: Tier) -> Vec<String> {
        let words = match tier {
            Tier::Short => &self.short,
            Tier::Medium => &self.medium,
            Tier::Long => &self.long,
        };
        words.iter().map(|w| normalize_word(w)).filter(|w| !w.is_empty()).collect()
    }
}

/// Split a word file into trimmed, lowercased, non-blank words
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

fn fallback_words() -> Vec<String> {
    FALLBACK_WORDS.iter().map(|w| w.to_string()).collect()
}

/// The three tier lists a session draws from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBank {
    short: Vec<String>,
    medium: Vec<String>,
    long: Vec<String>,
}

impl WordBank {
    /// Load every tier from `source`
    pub fn load(source: &dyn WordSource) -> Self {
        Self {
            short: source.load(Tier::Short),
            medium: source.load(Tier::Medium),
            long: source.load(Tier::Long),
        }
    }

    pub fn words(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Short => &self.short,
            Tier::Medium => &self.medium,
            Tier::Long => &self.long,
        }
    }

    /// Uniformly random word from `tier`, or [`FALLBACK_WORD`] if the list is empty
    pub fn select_word<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> String {
        self.words(tier)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_WORD.to_string())
    }
}
