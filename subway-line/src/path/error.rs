//! Path error types.
//!
//! Insert and remove rejections are ordinary validation failures: the path
//! is left exactly as it was. `PathIntegrityError` is different in kind; it
//! means the segment set no longer forms a single chain, which correct
//! mutation history never produces.

use crate::domain::{Distance, LineId, Station};

/// Why a segment could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// Segment belongs to another line
    #[error("segment belongs to line {found}, not line {expected}")]
    WrongLine { expected: LineId, found: LineId },

    /// Same upstream and downstream already form a segment
    #[error("segment {upstream} -> {downstream} is already on the line")]
    DuplicateSection {
        upstream: Station,
        downstream: Station,
    },

    /// Both stations are on the line but not adjacent in that direction
    #[error("stations {upstream} and {downstream} are both already on the line")]
    StationsAlreadyOnPath {
        upstream: Station,
        downstream: Station,
    },

    /// Splitting would need a distance shorter than the new one
    #[error("new distance {new} must be shorter than the existing segment's {existing}")]
    InvalidDistance { new: Distance, existing: Distance },

    /// Segment shares no station with the line
    #[error("segment {upstream} -> {downstream} shares no station with the line")]
    DisconnectedSection {
        upstream: Station,
        downstream: Station,
    },
}

/// Why a station could not be removed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoveError {
    /// The line has only one segment left
    #[error("a line with a single segment cannot lose a station")]
    SingleSegment,

    /// The station is not on the line
    #[error("station {0} is not on the line")]
    StationNotFound(Station),

    /// Merged distance would not fit
    #[error("merging {first} and {second} overflows the distance range")]
    DistanceOverflow { first: Distance, second: Distance },
}

/// The segment set does not form exactly one simple chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathIntegrityError {
    /// No segment starts at a station that nothing leads into
    #[error("no start segment found")]
    NoStartSegment,

    /// More than one candidate start segment
    #[error("{0} candidate start segments found")]
    MultipleStartSegments(usize),

    /// Walking forward revisits a station
    #[error("path revisits station {0}")]
    Cycle(Station),

    /// Two segments share the same endpoints
    #[error("segment {upstream} -> {downstream} appears more than once")]
    DuplicateSection {
        upstream: Station,
        downstream: Station,
    },

    /// A segment is tagged with another line
    #[error("segment belongs to line {found}, not line {expected}")]
    ForeignSegment { expected: LineId, found: LineId },

    /// The walk from the start does not reach every segment
    #[error("walk covered {reached} of {total} segments")]
    Disconnected { reached: usize, total: usize },
}
