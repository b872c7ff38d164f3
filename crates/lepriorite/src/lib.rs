//! lepriorite - Heuristic Priority Scoring
//!
//! *La Priorité* (The Priority) - Keyword and deadline heuristics that suggest
//! a priority label for a task, with a justification and a confidence value.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Reference clock abstraction
pub mod clock;

/// Deadline parsing and proximity windows
pub mod deadline;

mod iso;

/// Fixed keyword sets used for matching
pub mod keywords;

/// Scoring algorithm
pub mod scorer;

/// Input and result types
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use deadline::{parse_deadline, Deadline, DeadlineParseError, DeadlineWindow};
pub use keywords::{KeywordSet, LOW, MEDIUM, URGENT};
pub use scorer::{score, PriorityScorer};
pub use types::{Priority, ScoreInput, ScoreResult};
