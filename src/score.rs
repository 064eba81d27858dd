use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "snaker";
const SCORE_FILE_NAME: &str = "scores.json";

/// Per-level high-score persistence.
///
/// Access is synchronous and best-effort: implementations never surface
/// failures to the game.
pub trait HighScoreStore {
    /// Returns the recorded high score for `level`, if any.
    fn high_score(&self, level: u32) -> Option<i64>;

    /// Records `score` as the high score for `level`.
    fn set_high_score(&mut self, level: u32, score: i64);
}

/// Storage key for a level's high score.
#[must_use]
pub fn level_key(level: u32) -> String {
    format!("highScore-level-{level}")
}

/// In-process store, used by tests and when no data directory exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<String, i64>,
}

impl HighScoreStore for MemoryScoreStore {
    fn high_score(&self, level: u32) -> Option<i64> {
        self.scores.get(&level_key(level)).copied()
    }

    fn set_high_score(&mut self, level: u32, score: i64) {
        self.scores.insert(level_key(level), score);
    }
}

/// Failure reading or writing the score file.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    scores: BTreeMap<String, i64>,
}

/// JSON file store keyed by [`level_key`].
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the score for `level`, surfacing errors.
    ///
    /// A missing file is not an error and yields `Ok(None)`.
    pub fn try_load(&self, level: u32) -> Result<Option<i64>, ScoreStoreError> {
        Ok(read_score_file(&self.path)?.scores.get(&level_key(level)).copied())
    }

    /// Writes the score for `level`, keeping other levels intact.
    pub fn try_save(&self, level: u32, score: i64) -> Result<(), ScoreStoreError> {
        // An unreadable file is replaced rather than blocking the save.
        let mut file = read_score_file(&self.path).unwrap_or_default();
        file.scores.insert(level_key(level), score);
        write_score_file(&self.path, &file)
    }
}

impl HighScoreStore for JsonScoreStore {
    fn high_score(&self, level: u32) -> Option<i64> {
        match self.try_load(level) {
            Ok(score) => score,
            Err(error) => {
                warn!("failed to load high score for level {level}: {error}");
                None
            }
        }
    }

    fn set_high_score(&mut self, level: u32, score: i64) {
        if let Err(error) = self.try_save(level, score) {
            warn!("failed to save high score for level {level}: {error}");
        }
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn read_score_file(path: &Path) -> Result<ScoreFile, ScoreStoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn write_score_file(path: &Path, file: &ScoreFile) -> Result<(), ScoreStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json)?;
    Ok(())
}
