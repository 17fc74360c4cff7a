//! The line aggregate.
//!
//! A `Line` owns its [`Path`] and is the only thing that mutates it. Every
//! edit is applied to a copy, persisted, and only then committed, so a
//! rejected edit or a failed save leaves the line exactly as it was.

use tracing::{debug, info};

use crate::domain::{Distance, InvalidSegment, LineId, Segment, Station};
use crate::path::{InsertError, Path, PathIntegrityError, RemoveError};
use crate::store::{SegmentStore, StoreError};

/// Errors from editing or loading a line.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The requested segment is malformed
    #[error(transparent)]
    InvalidSegment(#[from] InvalidSegment),

    /// The path rejected the new segment
    #[error("cannot add segment: {0}")]
    Insert(#[from] InsertError),

    /// The path rejected the station removal
    #[error("cannot remove station: {0}")]
    Remove(#[from] RemoveError),

    /// The segment store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The path no longer forms a single chain
    #[error("line integrity fault: {0}")]
    Integrity(#[from] PathIntegrityError),
}

impl LineError {
    /// True for edits the caller asked for that the line refused.
    ///
    /// False for storage failures and integrity faults.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LineError::InvalidSegment(_) | LineError::Insert(_) | LineError::Remove(_)
        )
    }
}

/// A transit line and its segment chain.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    path: Path,
}

impl Line {
    /// Create a line with no segments.
    pub fn new(id: LineId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: Path::new(id),
        }
    }

    /// Load a line's segments from a store.
    ///
    /// A line with nothing stored starts empty.
    pub fn load<S: SegmentStore>(
        id: LineId,
        name: impl Into<String>,
        store: &S,
    ) -> Result<Self, LineError> {
        let path = match store.load(id)? {
            Some(segments) => Path::from_segments(id, segments)
                .map_err(|source| StoreError::Integrity { line: id, source })?,
            None => Path::new(id),
        };
        debug!(line = %id, segments = path.len(), "Loaded line");
        Ok(Self {
            id,
            name: name.into(),
            path,
        })
    }

    /// Returns the line identifier.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the line name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the segment chain.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stations in travel order.
    pub fn stations(&self) -> Result<Vec<Station>, PathIntegrityError> {
        self.path.ordered_stations()
    }

    /// Add the segment `upstream → downstream` and persist the result.
    pub fn add_segment<S: SegmentStore>(
        &mut self,
        upstream: Station,
        downstream: Station,
        distance: Distance,
        store: &mut S,
    ) -> Result<(), LineError> {
        let segment = Segment::new(self.id, upstream, downstream, distance)?;
        let mut next = self.path.clone();
        next.insert(segment)?;
        self.commit(next, store)
    }

    /// Remove a station and persist the result.
    pub fn remove_station<S: SegmentStore>(
        &mut self,
        station: &Station,
        store: &mut S,
    ) -> Result<(), LineError> {
        let mut next = self.path.clone();
        next.remove(station)?;
        self.commit(next, store)
    }

    fn commit<S: SegmentStore>(&mut self, next: Path, store: &mut S) -> Result<(), LineError> {
        store.save(self.id, next.segments())?;
        self.path = next;
        info!(
            line = %self.id,
            segments = self.path.len(),
            total_distance = self.path.total_distance(),
            "Line updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::store::MemoryStore;

    const LINE: LineId = LineId::new(4);

    fn station(id: u64) -> Station {
        Station::new(StationId::new(id), format!("S{id}"))
    }

    fn km(v: u32) -> Distance {
        Distance::new(v).unwrap()
    }

    fn ids(line: &Line) -> Vec<u64> {
        line.stations()
            .unwrap()
            .iter()
            .map(|s| s.id().get())
            .collect()
    }

    /// Store whose saves always fail.
    struct BrokenStore;

    impl SegmentStore for BrokenStore {
        fn load(&self, _line: LineId) -> Result<Option<Vec<Segment>>, StoreError> {
            Ok(None)
        }

        fn save(&mut self, _line: LineId, _segments: &[Segment]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn edits_are_persisted() {
        let mut store = MemoryStore::new();
        let mut line = Line::new(LINE, "Line 4");

        line.add_segment(station(1), station(2), km(10), &mut store)
            .unwrap();
        line.add_segment(station(2), station(3), km(5), &mut store)
            .unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.load(LINE).unwrap().unwrap(), line.path().segments());
        assert_eq!(ids(&line), vec![1, 2, 3]);
    }

    #[test]
    fn rejected_edit_is_not_persisted() {
        let mut store = MemoryStore::new();
        let mut line = Line::new(LINE, "Line 4");
        line.add_segment(station(1), station(2), km(10), &mut store)
            .unwrap();

        let err = line
            .add_segment(station(1), station(2), km(3), &mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            LineError::Insert(InsertError::DuplicateSection { .. })
        ));
        assert!(err.is_rejection());

        let err = line.remove_station(&station(1), &mut store).unwrap_err();
        assert!(matches!(err, LineError::Remove(RemoveError::SingleSegment)));

        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn self_loop_rejected_before_path() {
        let mut store = MemoryStore::new();
        let mut line = Line::new(LINE, "Line 4");

        let err = line
            .add_segment(station(1), station(1), km(3), &mut store)
            .unwrap_err();
        assert!(matches!(err, LineError::InvalidSegment(_)));
        assert!(line.path().is_empty());
    }

    #[test]
    fn failed_save_leaves_line_unchanged() {
        let mut good = MemoryStore::new();
        let mut line = Line::new(LINE, "Line 4");
        line.add_segment(station(1), station(2), km(10), &mut good)
            .unwrap();
        line.add_segment(station(2), station(3), km(5), &mut good)
            .unwrap();

        let err = line
            .add_segment(station(1), station(9), km(4), &mut BrokenStore)
            .unwrap_err();
        assert!(matches!(err, LineError::Store(_)));
        assert!(!err.is_rejection());

        let err = line.remove_station(&station(2), &mut BrokenStore).unwrap_err();
        assert!(matches!(err, LineError::Store(_)));

        assert_eq!(ids(&line), vec![1, 2, 3]);
    }

    #[test]
    fn load_rebuilds_stored_line() {
        let mut store = MemoryStore::new();
        let mut line = Line::new(LINE, "Line 4");
        line.add_segment(station(1), station(2), km(10), &mut store)
            .unwrap();
        line.add_segment(station(1), station(3), km(4), &mut store)
            .unwrap();

        let reloaded = Line::load(LINE, "Line 4", &store).unwrap();
        assert_eq!(ids(&reloaded), vec![1, 3, 2]);
        assert_eq!(reloaded.path().total_distance(), 10);
    }

    #[test]
    fn load_missing_line_is_empty() {
        let store = MemoryStore::new();
        let line = Line::load(LINE, "Line 4", &store).unwrap();
        assert!(line.path().is_empty());
        assert_eq!(line.name(), "Line 4");
    }

    #[test]
    fn load_inconsistent_line_fails() {
        let mut store = MemoryStore::new();
        let broken = vec![
            Segment::new(LINE, station(1), station(3), km(2)).unwrap(),
            Segment::new(LINE, station(2), station(3), km(2)).unwrap(),
        ];
        store.save(LINE, &broken).unwrap();

        let err = Line::load(LINE, "Line 4", &store).unwrap_err();
        assert!(matches!(
            err,
            LineError::Store(StoreError::Integrity {
                source: PathIntegrityError::MultipleStartSegments(2),
                ..
            })
        ));
    }
}
