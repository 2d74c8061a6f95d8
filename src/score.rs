use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_DIR_NAME: &str = "lobe-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Where the single persisted high score lives.
pub trait HighScoreStore {
    /// Returns the stored high score, `Ok(0)` when nothing was stored yet.
    fn load(&self) -> io::Result<u32>;

    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// JSON file store under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct default location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileScoreStore {
    fn load(&self) -> io::Result<u32> {
        load_high_score_from_path(&self.path)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        save_high_score_to_path(&self.path, score)
    }
}

/// In-memory store, for tests and runs without a writable data directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    pub high_score: u32,
}

impl HighScoreStore for MemoryScoreStore {
    fn load(&self) -> io::Result<u32> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.high_score = score;
        Ok(())
    }
}

/// Returns the platform data directory for this game.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    data_dir().join(SCORE_FILE_NAME)
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
