//! Solution checking for solved grids.

use crate::{CellState, Grid, MazeError, Position, Solver};
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a solution is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path does not begin at the start cell")]
    NotFromStart,
    #[error("path does not finish at the end cell")]
    NotToEnd,
    #[error("{from} and {to} are not adjacent")]
    Gap { from: Position, to: Position },
    #[error("{0} appears more than once")]
    Repeated(Position),
    #[error("path crosses a wall at {0}")]
    ThroughWall(Position),
    #[error("{0} is on the path but not marked")]
    Unmarked(Position),
    #[error("{0} is marked on-path but is not part of the path")]
    Stray(Position),
    #[error("{position} touches {neighbors} path cells")]
    Branch { position: Position, neighbors: usize },
    #[error("{0} path cells are not connected to the start")]
    Detached(usize),
    #[error("no path leads from the start to the end")]
    Unsolvable,
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Check a solver path against the grid it was found in.
///
/// The path must run from start to end through adjacent, distinct, non-wall
/// cells, and the grid's `OnPath` cells must be exactly its interior.
pub fn verify_path(grid: &Grid, path: &[Position]) -> Result<(), PathError> {
    let start = grid.require_start()?;
    let end = grid.require_end()?;

    if path.first() != Some(&start) {
        return Err(PathError::NotFromStart);
    }
    if path.last() != Some(&end) {
        return Err(PathError::NotToEnd);
    }
    for pair in path.windows(2) {
        if !pair[0].is_adjacent(pair[1]) {
            return Err(PathError::Gap {
                from: pair[0],
                to: pair[1],
            });
        }
    }

    let mut seen = HashSet::with_capacity(path.len());
    for &pos in path {
        if !seen.insert(pos) {
            return Err(PathError::Repeated(pos));
        }
        let cell = grid.cell_at(pos)?;
        if cell.is_wall() {
            return Err(PathError::ThroughWall(pos));
        }
        if pos != start && pos != end && cell != CellState::OnPath {
            return Err(PathError::Unmarked(pos));
        }
    }

    match grid
        .positions()
        .find(|&pos| grid.get(pos) == CellState::OnPath && !seen.contains(&pos))
    {
        Some(stray) => Err(PathError::Stray(stray)),
        None => Ok(()),
    }
}

/// Check that the `OnPath` cells drawn into a grid are the solver's answer.
///
/// A cleared copy of the grid is solved again with the default solver and
/// the drawn cells must match that path exactly. Returns the path.
pub fn verify_solution(grid: &Grid) -> Result<Vec<Position>, PathError> {
    let mut fresh = grid.clone();
    fresh.clear_overlays();
    let report = Solver::new().solve(&mut fresh)?;
    let path = report.path.ok_or(PathError::Unsolvable)?;
    verify_path(grid, &path)?;
    Ok(path)
}

/// Recover and check a solution drawn as a simple chain.
///
/// The `OnPath` cells together with start and end must form one simple
/// chain: start and end touch one chain cell each, every other chain cell
/// touches exactly two. Returns the chain from start to end. Solver paths
/// through open rooms can run alongside themselves and fail this test; use
/// [`verify_solution`] for those.
pub fn verify_overlay(grid: &Grid) -> Result<Vec<Position>, PathError> {
    let start = grid.require_start()?;
    let end = grid.require_end()?;

    let chain: HashSet<Position> = grid
        .positions()
        .filter(|&pos| grid.get(pos) == CellState::OnPath)
        .chain([start, end])
        .collect();
    let chain_neighbors = |pos: Position| -> Vec<Position> {
        grid.neighbors(pos).filter(|n| chain.contains(n)).collect()
    };

    // Walk the chain in row-major order for a stable error position
    for pos in grid.positions().filter(|p| chain.contains(p)) {
        let expected = if pos == start || pos == end { 1 } else { 2 };
        let neighbors = chain_neighbors(pos).len();
        if neighbors != expected {
            return Err(PathError::Branch {
                position: pos,
                neighbors,
            });
        }
    }

    let mut path = vec![start];
    let mut prev: Option<Position> = None;
    let mut current = start;
    while current != end {
        let Some(next) = chain_neighbors(current)
            .into_iter()
            .find(|&n| Some(n) != prev)
        else {
            break;
        };
        prev = Some(current);
        current = next;
        path.push(current);
    }

    if path.len() != chain.len() {
        return Err(PathError::Detached(chain.len() - path.len()));
    }
    Ok(path)
}
