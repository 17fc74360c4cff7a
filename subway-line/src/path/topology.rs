//! The segment chain of a single line.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Distance, LineId, Segment, Station, StationId};

use super::error::{InsertError, PathIntegrityError, RemoveError};

/// The segments of one line, forming a single directed chain of stations.
///
/// Segments are stored unordered; [`Path::ordered_stations`] recovers the
/// order by walking from the only station nothing leads into.
///
/// # Invariants
///
/// After every successful mutation:
/// - the segments form exactly one simple chain (one start, one end, every
///   other station entered once and left once)
/// - no two segments share the same `(upstream, downstream)` pair
/// - every segment belongs to this path's line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    line: LineId,
    segments: Vec<Segment>,
}

impl Path {
    /// Create an empty path for a line.
    pub fn new(line: LineId) -> Self {
        Self {
            line,
            segments: Vec::new(),
        }
    }

    /// Rebuild a path from previously stored segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a segment belongs to another line, if two segments
    /// repeat the same endpoints, or if a non-empty set does not form one
    /// simple chain.
    pub fn from_segments(line: LineId, segments: Vec<Segment>) -> Result<Self, PathIntegrityError> {
        let mut seen = HashSet::with_capacity(segments.len());
        for segment in &segments {
            if segment.line() != line {
                return Err(PathIntegrityError::ForeignSegment {
                    expected: line,
                    found: segment.line(),
                });
            }
            if !seen.insert((segment.upstream().id(), segment.downstream().id())) {
                return Err(PathIntegrityError::DuplicateSection {
                    upstream: segment.upstream().clone(),
                    downstream: segment.downstream().clone(),
                });
            }
        }

        let path = Self { line, segments };
        if !path.is_empty() {
            let reached = path.ordered_segments()?.len();
            if reached != path.len() {
                return Err(PathIntegrityError::Disconnected {
                    reached,
                    total: path.len(),
                });
            }
        }
        Ok(path)
    }

    /// Returns the line this path belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the segments in storage order (not travel order).
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any segment starts or ends at `station`.
    pub fn contains(&self, station: &Station) -> bool {
        self.segments.iter().any(|s| s.touches(station))
    }

    /// Sum of all segment distances.
    pub fn total_distance(&self) -> u64 {
        self.segments
            .iter()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }

    /// Returns the stations from start to end.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is not exactly one start segment, or if the walk
    /// revisits a station. Neither happens while the invariants hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_line::domain::{Distance, LineId, Segment, Station, StationId};
    /// use subway_line::path::Path;
    ///
    /// let line = LineId::new(1);
    /// let a = Station::new(StationId::new(1), "A");
    /// let b = Station::new(StationId::new(2), "B");
    /// let c = Station::new(StationId::new(3), "C");
    /// let seg = |u: &Station, d: &Station, km| {
    ///     Segment::new(line, u.clone(), d.clone(), Distance::new(km).unwrap()).unwrap()
    /// };
    ///
    /// let mut path = Path::new(line);
    /// path.insert(seg(&b, &c, 3)).unwrap();
    /// path.insert(seg(&a, &b, 5)).unwrap();
    ///
    /// assert_eq!(path.ordered_stations().unwrap(), vec![a, b, c]);
    /// ```
    pub fn ordered_stations(&self) -> Result<Vec<Station>, PathIntegrityError> {
        let ordered = self.ordered_segments()?;
        let mut stations = Vec::with_capacity(ordered.len() + 1);
        // ordered_segments never returns an empty walk
        if let Some(first) = ordered.first() {
            stations.push(first.upstream().clone());
        }
        stations.extend(ordered.iter().map(|s| s.downstream().clone()));
        Ok(stations)
    }

    /// Returns the segments in travel order, starting at the start segment.
    ///
    /// Stops at the first station no segment leaves from.
    pub fn ordered_segments(&self) -> Result<Vec<&Segment>, PathIntegrityError> {
        let start = self.start_segment()?;

        let by_upstream: HashMap<StationId, &Segment> = self
            .segments
            .iter()
            .map(|s| (s.upstream().id(), s))
            .collect();

        let mut visited: HashSet<StationId> = HashSet::with_capacity(self.segments.len() + 1);
        visited.insert(start.upstream().id());

        let mut ordered = Vec::with_capacity(self.segments.len());
        let mut current = start;
        loop {
            let next_station = current.downstream();
            if !visited.insert(next_station.id()) {
                return Err(PathIntegrityError::Cycle(next_station.clone()));
            }
            ordered.push(current);
            match by_upstream.get(&next_station.id()) {
                Some(&next) => current = next,
                None => break,
            }
        }
        Ok(ordered)
    }

    /// The unique segment whose upstream is nobody's downstream.
    fn start_segment(&self) -> Result<&Segment, PathIntegrityError> {
        let downstreams: HashSet<StationId> =
            self.segments.iter().map(|s| s.downstream().id()).collect();

        let mut candidates = self
            .segments
            .iter()
            .filter(|s| !downstreams.contains(&s.upstream().id()));

        let first = candidates.next();
        let others = candidates.count();
        match (first, others) {
            (None, _) => Err(PathIntegrityError::NoStartSegment),
            (Some(start), 0) => Ok(start),
            (Some(_), others) => Err(PathIntegrityError::MultipleStartSegments(others + 1)),
        }
    }

    /// Insert a segment, splitting an existing one if they share an end.
    ///
    /// If `new` starts where an existing segment starts, that segment is
    /// replaced by the remainder `new.downstream → old.downstream`. If instead
    /// it ends where an existing segment ends, the remainder is
    /// `old.upstream → new.upstream`. Either way `new` itself is then added.
    ///
    /// # Errors
    ///
    /// Checked in this order; any failure leaves the path unchanged:
    /// - [`InsertError::WrongLine`]: `new` belongs to another line
    /// - [`InsertError::DuplicateSection`]: the same endpoints already form a segment
    /// - [`InsertError::InvalidDistance`]: a split needs `new` to be strictly shorter
    /// - [`InsertError::StationsAlreadyOnPath`]: both endpoints are already on the path
    /// - [`InsertError::DisconnectedSection`]: `new` shares no station with a non-empty path
    pub fn insert(&mut self, new: Segment) -> Result<(), InsertError> {
        if new.line() != self.line {
            return Err(InsertError::WrongLine {
                expected: self.line,
                found: new.line(),
            });
        }

        if self
            .segments
            .iter()
            .any(|s| s.connects(new.upstream(), new.downstream()))
        {
            return Err(InsertError::DuplicateSection {
                upstream: new.upstream().clone(),
                downstream: new.downstream().clone(),
            });
        }

        let split = self.plan_split(&new)?;

        // Both ends already on the line: accepting would close a loop or branch
        if self.contains(new.upstream()) && self.contains(new.downstream()) {
            return Err(InsertError::StationsAlreadyOnPath {
                upstream: new.upstream().clone(),
                downstream: new.downstream().clone(),
            });
        }

        if split.is_none()
            && !self.segments.is_empty()
            && !self.segments.iter().any(|s| s.shares_station_with(&new))
        {
            return Err(InsertError::DisconnectedSection {
                upstream: new.upstream().clone(),
                downstream: new.downstream().clone(),
            });
        }

        if let Some((index, remainder)) = split {
            let old = self.segments.remove(index);
            debug!(
                line = %self.line,
                old_upstream = %old.upstream().id(),
                old_downstream = %old.downstream().id(),
                remainder_upstream = %remainder.upstream().id(),
                remainder_downstream = %remainder.downstream().id(),
                remainder_distance = remainder.distance().get(),
                "Split segment"
            );
            self.segments.push(remainder);
        }

        debug!(
            line = %self.line,
            upstream = %new.upstream().id(),
            downstream = %new.downstream().id(),
            distance = new.distance().get(),
            "Inserted segment"
        );
        self.segments.push(new);
        Ok(())
    }

    /// Find the segment `new` splits and compute its remainder.
    ///
    /// A shared upstream takes priority over a shared downstream.
    fn plan_split(&self, new: &Segment) -> Result<Option<(usize, Segment)>, InsertError> {
        if let Some(index) = self
            .segments
            .iter()
            .position(|old| old.upstream().same_as(new.upstream()))
        {
            let old = &self.segments[index];
            let distance = remaining_distance(old, new)?;
            let remainder = Segment::rejoin(
                old.line(),
                new.downstream().clone(),
                old.downstream().clone(),
                distance,
            );
            return Ok(Some((index, remainder)));
        }

        if let Some(index) = self
            .segments
            .iter()
            .position(|old| old.downstream().same_as(new.downstream()))
        {
            let old = &self.segments[index];
            let distance = remaining_distance(old, new)?;
            let remainder = Segment::rejoin(
                old.line(),
                old.upstream().clone(),
                new.upstream().clone(),
                distance,
            );
            return Ok(Some((index, remainder)));
        }

        Ok(None)
    }

    /// Remove a station, merging its two segments if it sits between them.
    ///
    /// Removing an end station drops the one segment touching it. Removing an
    /// interior station replaces `X → station` and `station → Y` with a single
    /// `X → Y` whose distance is the sum of both.
    ///
    /// # Errors
    ///
    /// Any failure leaves the path unchanged:
    /// - [`RemoveError::SingleSegment`]: the path has exactly one segment
    /// - [`RemoveError::StationNotFound`]: no segment touches `station`
    /// - [`RemoveError::DistanceOverflow`]: the merged distance does not fit
    pub fn remove(&mut self, station: &Station) -> Result<(), RemoveError> {
        if self.segments.len() == 1 {
            return Err(RemoveError::SingleSegment);
        }

        let into = self
            .segments
            .iter()
            .position(|s| s.downstream().same_as(station));
        let out_of = self
            .segments
            .iter()
            .position(|s| s.upstream().same_as(station));

        match (into, out_of) {
            (None, None) => Err(RemoveError::StationNotFound(station.clone())),
            (Some(into), Some(out_of)) => {
                let before = &self.segments[into];
                let after = &self.segments[out_of];
                let distance = before.distance().checked_add(after.distance()).ok_or(
                    RemoveError::DistanceOverflow {
                        first: before.distance(),
                        second: after.distance(),
                    },
                )?;
                let merged = Segment::rejoin(
                    before.line(),
                    before.upstream().clone(),
                    after.downstream().clone(),
                    distance,
                );

                // Remove the later index first so the earlier one stays valid
                self.segments.remove(into.max(out_of));
                self.segments.remove(into.min(out_of));

                debug!(
                    line = %self.line,
                    station = %station.id(),
                    merged_upstream = %merged.upstream().id(),
                    merged_downstream = %merged.downstream().id(),
                    merged_distance = distance.get(),
                    "Merged segments around removed station"
                );
                self.segments.push(merged);
                Ok(())
            }
            (Some(index), None) | (None, Some(index)) => {
                let removed = self.segments.remove(index);
                debug!(
                    line = %self.line,
                    station = %station.id(),
                    upstream = %removed.upstream().id(),
                    downstream = %removed.downstream().id(),
                    "Removed end segment"
                );
                Ok(())
            }
        }
    }
}

/// Distance left over after cutting `new` out of `old`.
fn remaining_distance(old: &Segment, new: &Segment) -> Result<Distance, InsertError> {
    old.distance()
        .checked_sub(new.distance())
        .ok_or(InsertError::InvalidDistance {
            new: new.distance(),
            existing: old.distance(),
        })
}
