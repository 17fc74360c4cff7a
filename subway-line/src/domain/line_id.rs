//! Line identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the line a segment belongs to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(u64);

impl LineId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        LineId(raw)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_roundtrip() {
        let line = LineId::new(2);
        assert_eq!(line.get(), 2);
        assert_eq!(LineId::new(line.get()), line);
    }

    #[test]
    fn display_and_debug() {
        let line = LineId::new(9);
        assert_eq!(line.to_string(), "9");
        assert_eq!(format!("{:?}", line), "LineId(9)");
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&LineId::new(4)).unwrap(), "4");
        assert_eq!(serde_json::from_str::<LineId>("4").unwrap(), LineId::new(4));
    }
}
