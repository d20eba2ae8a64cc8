//! Core maze engine.
//!
//! Grids of cell states, a randomized backtracking generator that carves
//! perfect mazes, and a depth-first solver that marks the solution path and
//! the dead ends it proved along the way.

mod direction;
mod error;
mod grid;

pub mod check;
pub mod explore;
pub mod generator;
pub mod solver;
pub mod text;


pub use check::{verify_overlay, verify_path, verify_solution, PathError};
pub use direction::Direction;
pub use error::{Marker, MazeError};
pub use explore::{Explorer, MoveOutcome};
pub use generator::{
    CarveStats, GenerationStats, Generator, GeneratorConfig, RandomSource, SimpleRng,
};
pub use grid::{CellState, Grid, Position};
pub use solver::{SolveReport, Solver, SolverConfig};
pub use text::FormatError;
