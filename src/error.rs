//! Error types for searches and layout parsing.

use grid_util::point::Point;
use thiserror::Error;

/// Misuse of the search protocol. Running out of path is not an error, see
/// [StepOutcome::NoPath](crate::search::StepOutcome::NoPath).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("no search session is active")]
    SessionNotActive,

    #[error("distance labels from an earlier search are still present")]
    StaleLabels,

    #[error("the finish cell is missing or not seeded with distance 0")]
    UnseededFinish,

    #[error("cursor at {0} is no longer a start or current cell")]
    CursorLost(Point),
}

/// Problems found while reading a text layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        glyph: char,
        column: usize,
        row: usize,
    },

    #[error("layout marks more than one start")]
    DuplicateStart,

    #[error("layout marks more than one finish")]
    DuplicateFinish,
}
