//! Station identity types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Stable identifier of a station, assigned by whoever owns the stations.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        StationId(raw)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station referenced by a line.
///
/// Stations are owned elsewhere; a line only holds copies of them. Two
/// `Station` values are the same station exactly when their ids match, so a
/// station loaded twice (perhaps with a stale name) still compares equal.
///
/// # Examples
///
/// ```
/// use subway_line::domain::{Station, StationId};
///
/// let a = Station::new(StationId::new(1), "Gangnam");
/// let renamed = Station::new(StationId::new(1), "Gangnam (old name)");
/// let b = Station::new(StationId::new(2), "Yeoksam");
///
/// assert!(a.same_as(&renamed));
/// assert_eq!(a, renamed);
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station reference.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity comparison by stable identifier.
    pub fn same_as(&self, other: &Station) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({} {})", self.id.0, self.name)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
