//! Domain types for a single transit line.
//!
//! These are validated value types: a `Distance` is always positive and a
//! `Segment` never loops onto one station, so code holding them can trust
//! those facts without re-checking.

mod distance;
mod line_id;
mod segment;
mod station;

pub use distance::{Distance, InvalidDistance};
pub use line_id::LineId;
pub use segment::{InvalidSegment, Segment};
pub use station::{Station, StationId};
