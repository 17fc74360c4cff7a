//! In-memory segment store.

use std::collections::HashMap;

use crate::domain::{LineId, Segment};

use super::{SegmentStore, StoreError};

/// Keeps each line's segments in a map. Useful for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lines: HashMap<LineId, Vec<Segment>>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Returns the number of lines with stored segments.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no line has been stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl SegmentStore for MemoryStore {
    fn load(&self, line: LineId) -> Result<Option<Vec<Segment>>, StoreError> {
        Ok(self.lines.get(&line).cloned())
    }

    fn save(&mut self, line: LineId, segments: &[Segment]) -> Result<(), StoreError> {
        self.saves += 1;
        self.lines.insert(line, segments.to_vec());
        Ok(())
    }
}
