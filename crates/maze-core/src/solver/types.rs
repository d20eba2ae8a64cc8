use crate::Position;
use serde::{Deserialize, Serialize};

/// Result of a solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Start to end inclusive, `None` when the maze is unsolvable
    pub path: Option<Vec<Position>>,
    /// Cells the search entered, the start included
    pub explored: usize,
    /// Cells left marked `DeadEnd`
    pub dead_ends: usize,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells on the path, zero when unsolved
    pub fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, Vec::len)
    }
}
