//! Segment type: one directed, weighted edge of a line.

use serde::{Deserialize, Serialize};

use super::{Distance, LineId, Station};

/// Error returned when constructing an invalid segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSegment {
    /// Upstream and downstream are the same station
    #[error("segment cannot start and end at station {0}")]
    SameStation(Station),
}

/// A directed edge `upstream → downstream` of a given length on one line.
///
/// # Invariants
///
/// - `upstream` and `downstream` are different stations
/// - `distance` is positive (guaranteed by [`Distance`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSegment")]
pub struct Segment {
    line: LineId,
    upstream: Station,
    downstream: Station,
    distance: Distance,
}

impl Segment {
    /// Create a segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_line::domain::{Distance, LineId, Segment, Station, StationId};
    ///
    /// let a = Station::new(StationId::new(1), "A");
    /// let b = Station::new(StationId::new(2), "B");
    /// let line = LineId::new(2);
    ///
    /// let seg = Segment::new(line, a.clone(), b, Distance::new(5).unwrap()).unwrap();
    /// assert_eq!(seg.upstream(), &a);
    ///
    /// // A segment may not loop back onto its own station
    /// assert!(Segment::new(line, a.clone(), a, Distance::new(5).unwrap()).is_err());
    /// ```
    pub fn new(
        line: LineId,
        upstream: Station,
        downstream: Station,
        distance: Distance,
    ) -> Result<Self, InvalidSegment> {
        if upstream.same_as(&downstream) {
            return Err(InvalidSegment::SameStation(upstream));
        }
        Ok(Self {
            line,
            upstream,
            downstream,
            distance,
        })
    }

    /// Build a split remainder or merged segment.
    ///
    /// Callers guarantee the two stations differ; path mutations only join
    /// stations that were already on distinct ends of existing segments.
    pub(crate) fn rejoin(
        line: LineId,
        upstream: Station,
        downstream: Station,
        distance: Distance,
    ) -> Self {
        debug_assert!(!upstream.same_as(&downstream));
        Self {
            line,
            upstream,
            downstream,
            distance,
        }
    }

    /// Returns the line this segment belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the origin station.
    pub fn upstream(&self) -> &Station {
        &self.upstream
    }

    /// Returns the destination station.
    pub fn downstream(&self) -> &Station {
        &self.downstream
    }

    /// Returns the segment length.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// True if this segment runs exactly `upstream → downstream`.
    pub fn connects(&self, upstream: &Station, downstream: &Station) -> bool {
        self.upstream.same_as(upstream) && self.downstream.same_as(downstream)
    }

    /// True if `station` is either end of this segment.
    pub fn touches(&self, station: &Station) -> bool {
        self.upstream.same_as(station) || self.downstream.same_as(station)
    }

    /// True if the two segments share any endpoint.
    pub fn shares_station_with(&self, other: &Segment) -> bool {
        self.touches(&other.upstream) || self.touches(&other.downstream)
    }
}

/// Unvalidated segment fields as read from storage.
#[derive(Deserialize)]
struct RawSegment {
    line: LineId,
    upstream: Station,
    downstream: Station,
    distance: Distance,
}

impl TryFrom<RawSegment> for Segment {
    type Error = InvalidSegment;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        Segment::new(raw.line, raw.upstream, raw.downstream, raw.distance)
    }
}
