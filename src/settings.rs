//! Game settings
//!
//! Stored as JSON next to the game. Anything missing or unreadable falls
//! back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;
use crate::words::FileWordSource;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Word lists ===
    /// Directory holding the word list files
    pub word_dir: PathBuf,
    pub short_words_file: String,
    pub medium_words_file: String,
    pub long_words_file: String,

    // === Simulation ===
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
    /// Cap on simulation steps per frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_dir: PathBuf::from("words"),
            short_words_file: "words_short.txt".to_string(),
            medium_words_file: "words_medium.txt".to_string(),
            long_words_file: "words_long.txt".to_string(),
            seed: None,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, defaulting on any problem
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<Settings>(&bytes) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {} ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Word source reading the configured files
    pub fn word_source(&self) -> FileWordSource {
        FileWordSource::new(&self.word_dir).with_files(
            &self.short_words_file,
            &self.medium_words_file,
            &self.long_words_file,
        )
    }

    /// Configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
