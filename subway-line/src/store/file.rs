//! JSON file segment store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LineId, Segment};

use super::{SegmentStore, StoreError};

/// Segments of one line as written to disk.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    line: LineId,
    segments: Vec<Segment>,
}

/// The whole store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredLines {
    lines: Vec<StoredLine>,
}

/// Configuration for the JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStoreConfig {
    /// Path to the store file.
    pub path: PathBuf,
}

impl JsonFileStoreConfig {
    /// Create a config for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStoreConfig {
    fn default() -> Self {
        Self::new("line_store.json")
    }
}

/// Stores every line's segments in one pretty-printed JSON file.
///
/// A missing file reads as an empty store. Each save rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: JsonFileStoreConfig,
}

impl JsonFileStore {
    /// Create a store with the given config.
    pub fn new(config: JsonFileStoreConfig) -> Self {
        Self { config }
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn read_all(&self) -> Result<StoredLines, StoreError> {
        if !self.config.path.exists() {
            return Ok(StoredLines::default());
        }
        let contents = std::fs::read_to_string(&self.config.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, stored: &StoredLines) -> Result<(), StoreError> {
        // Create parent directories if needed
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(stored)?;
        std::fs::write(&self.config.path, json)?;
        Ok(())
    }
}

impl SegmentStore for JsonFileStore {
    fn load(&self, line: LineId) -> Result<Option<Vec<Segment>>, StoreError> {
        let stored = self.read_all()?;
        Ok(stored
            .lines
            .into_iter()
            .find(|l| l.line == line)
            .map(|l| l.segments))
    }

    fn save(&mut self, line: LineId, segments: &[Segment]) -> Result<(), StoreError> {
        let mut stored = self.read_all()?;
        match stored.lines.iter_mut().find(|l| l.line == line) {
            Some(entry) => entry.segments = segments.to_vec(),
            None => stored.lines.push(StoredLine {
                line,
                segments: segments.to_vec(),
            }),
        }
        self.write_all(&stored)?;

        debug!(
            line = %line,
            segments = segments.len(),
            path = %self.config.path.display(),
            "Saved line segments"
        );
        Ok(())
    }
}
