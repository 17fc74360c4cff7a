//! Line topology: the ordered chain of segments making up one line.
//!
//! A [`Path`] keeps its segments as an unordered collection and rebuilds the
//! station order on demand. Inserting a segment that shares an end with an
//! existing one splits that segment; removing an interior station merges
//! its two neighbours back together.

mod error;
mod topology;


pub use error::{InsertError, PathIntegrityError, RemoveError};
pub use topology::Path;
