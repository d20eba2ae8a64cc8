use crate::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two designated cells a solvable grid must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Start,
    End,
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Start => write!(f, "start"),
            Marker::End => write!(f, "end"),
        }
    }
}

/// Errors raised by grid access, generation and solving
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A zero dimension, or a grid too small to hold distinct start and end cells.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Coordinate access outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
    /// A solve or navigation request on a grid without a start or end cell.
    #[error("maze has no {0} cell")]
    MissingMarker(Marker),
    /// Placing a marker on the cell that holds the other one.
    #[error("start and end would coincide at {0}")]
    MarkerConflict(Position),
    /// A position that is in bounds but cannot be occupied (a wall).
    #[error("position {0} is not an open cell")]
    InvalidPosition(Position),
}
