//! Segment distance type.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a non-positive distance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {value}: must be a positive integer")]
pub struct InvalidDistance {
    value: u32,
}

/// Length of a segment. Always strictly positive.
///
/// # Examples
///
/// ```
/// use subway_line::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// // Zero is rejected
/// assert!(Distance::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Distance(NonZeroU32);

impl Distance {
    /// Create a distance, rejecting zero.
    pub fn new(value: u32) -> Result<Self, InvalidDistance> {
        NonZeroU32::new(value)
            .map(Distance)
            .ok_or(InvalidDistance { value })
    }

    /// Returns the distance as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// `self - other`, or `None` unless the result stays positive.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        self.get()
            .checked_sub(other.get())
            .and_then(NonZeroU32::new)
            .map(Distance)
    }

    /// `self + other`, or `None` on overflow.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.get()).map(Distance)
    }
}

impl TryFrom<u32> for Distance {
    type Error = InvalidDistance;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for u32 {
    fn from(d: Distance) -> Self {
        d.get()
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u32) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn zero_rejected() {
        let err = Distance::new(0).unwrap_err();
        assert_eq!(err.to_string(), "invalid distance 0: must be a positive integer");
    }

    #[test]
    fn checked_sub_requires_positive_result() {
        assert_eq!(d(5).checked_sub(d(2)), Some(d(3)));
        assert_eq!(d(5).checked_sub(d(5)), None);
        assert_eq!(d(5).checked_sub(d(7)), None);
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(d(2).checked_add(d(3)), Some(d(5)));
        assert_eq!(d(u32::MAX).checked_add(d(1)), None);
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Distance>("0").is_err());
        assert_eq!(serde_json::from_str::<Distance>("4").unwrap(), d(4));
        assert_eq!(serde_json::to_string(&d(4)).unwrap(), "4");
    }

    #[test]
    fn ordering_follows_value() {
        assert!(d(2) < d(5));
        assert!(d(5) >= d(5));
    }
}
