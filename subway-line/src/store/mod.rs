//! Persistence for line segments.
//!
//! The path logic performs no I/O. After a successful edit the owning
//! [`Line`](crate::line::Line) hands its segments to a [`SegmentStore`].

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{JsonFileStore, JsonFileStoreConfig};
pub use memory::MemoryStore;

use crate::domain::{LineId, Segment};

/// Storage backend for the segments of each line.
pub trait SegmentStore {
    /// Load the stored segments of a line, or `None` if nothing is stored.
    fn load(&self, line: LineId) -> Result<Option<Vec<Segment>>, StoreError>;

    /// Replace the stored segments of a line.
    fn save(&mut self, line: LineId, segments: &[Segment]) -> Result<(), StoreError>;
}
