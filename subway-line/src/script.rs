//! Replayable scripts of line edits.
//!
//! A script names a line, lists the stations it may use, and gives the edits
//! to apply in order:
//!
//! ```json
//! {
//!   "line": { "id": 2, "name": "Line 2" },
//!   "stations": [{ "id": 1, "name": "Gangnam" }, { "id": 2, "name": "Yeoksam" }],
//!   "steps": [
//!     { "op": "insert", "upstream": 1, "downstream": 2, "distance": 10 },
//!     { "op": "remove", "station": 2 }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Distance, LineId, Station, StationId};
use crate::line::{Line, LineError};
use crate::store::SegmentStore;

/// Errors that stop a replay.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Failed to read the script
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid JSON or has the wrong shape
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),

    /// The station list repeats an id
    #[error("station {0} is listed more than once")]
    DuplicateStation(StationId),

    /// A step refers to a station not in the station list
    #[error("step {step} refers to unknown station {station}")]
    UnknownStation { step: usize, station: StationId },

    /// Loading, saving or reading the line failed
    #[error(transparent)]
    Line(#[from] LineError),
}

/// The line a script edits.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSpec {
    /// Line identifier
    pub id: LineId,

    /// Display name
    pub name: String,
}

/// One edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Add the segment `upstream → downstream`
    Insert {
        upstream: StationId,
        downstream: StationId,
        distance: Distance,
    },
    /// Remove a station
    Remove { station: StationId },
}

/// A full script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Line to edit
    pub line: LineSpec,

    /// Stations the steps may refer to
    #[serde(default)]
    pub stations: Vec<Station>,

    /// Edits, applied in order
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A step the line refused.
#[derive(Debug)]
pub struct Rejection {
    /// Zero-based step index
    pub step: usize,

    /// Why the line refused it
    pub error: LineError,
}

/// Outcome of a replay.
#[derive(Debug)]
pub struct Replay {
    /// The line after all accepted steps
    pub line: Line,

    /// Number of steps applied
    pub applied: usize,

    /// Steps the line refused, in order
    pub rejected: Vec<Rejection>,
}

/// Apply a script to the stored state of its line.
///
/// Rejected edits are logged and collected, and the replay continues.
/// Storage failures, integrity faults and unknown stations stop it.
pub fn replay<S: SegmentStore>(script: &Script, store: &mut S) -> Result<Replay, ScriptError> {
    let mut stations: HashMap<StationId, &Station> = HashMap::with_capacity(script.stations.len());
    for station in &script.stations {
        if stations.insert(station.id(), station).is_some() {
            return Err(ScriptError::DuplicateStation(station.id()));
        }
    }
    let lookup = |step: usize, id: StationId| {
        stations
            .get(&id)
            .map(|s| (*s).clone())
            .ok_or(ScriptError::UnknownStation { step, station: id })
    };

    let mut line = Line::load(script.line.id, script.line.name.clone(), store)?;
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        let result = match step {
            Step::Insert {
                upstream,
                downstream,
                distance,
            } => {
                let upstream = lookup(index, *upstream)?;
                let downstream = lookup(index, *downstream)?;
                line.add_segment(upstream, downstream, *distance, store)
            }
            Step::Remove { station } => {
                let station = lookup(index, *station)?;
                line.remove_station(&station, store)
            }
        };

        match result {
            Ok(()) => applied += 1,
            Err(error) if error.is_rejection() => {
                warn!(step = index, error = %error, "Step rejected");
                rejected.push(Rejection { step: index, error });
            }
            Err(error) => return Err(error.into()),
        }
    }

    Ok(Replay {
        line,
        applied,
        rejected,
    })
}

/// A station in a line summary.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    /// Station identifier
    pub id: StationId,

    /// Station name
    pub name: String,
}

/// Printable summary of a line.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    /// Line identifier
    pub line: LineId,

    /// Line name
    pub name: String,

    /// Stations in travel order
    pub stations: Vec<StationSummary>,

    /// Sum of segment distances
    pub total_distance: u64,
}

impl LineSummary {
    /// Summarize a line. An empty line has no stations.
    pub fn from_line(line: &Line) -> Result<Self, LineError> {
        let stations = if line.path().is_empty() {
            Vec::new()
        } else {
            line.stations()?
                .into_iter()
                .map(|s| StationSummary {
                    id: s.id(),
                    name: s.name().to_string(),
                })
                .collect()
        };
        Ok(Self {
            line: line.id(),
            name: line.name().to_string(),
            stations,
            total_distance: line.path().total_distance(),
        })
    }
}
