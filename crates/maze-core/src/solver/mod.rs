//! Maze solver.
//!
//! Validates the start/end markers, then runs the backtracking search in
//! place on the caller's grid.

mod backtrack;
mod types;

use crate::{Direction, Grid, MazeError};
use serde::{Deserialize, Serialize};

pub use types::SolveReport;

/// Configuration for the solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Neighbour order tried at every cell
    pub directions: [Direction; 4],
    /// Clear `OnPath`/`DeadEnd`/`Visited` cells before searching
    pub reset_overlays: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            directions: [
                Direction::Down,
                Direction::Up,
                Direction::Right,
                Direction::Left,
            ],
            reset_overlays: true,
        }
    }
}

/// Backtracking maze solver
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the default neighbour order
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve in place.
    ///
    /// On success the path cells between start and end are `OnPath`; every
    /// abandoned branch is `DeadEnd`. An unsolvable maze is reported through
    /// `SolveReport::path` being `None`, not as an error.
    pub fn solve(&self, grid: &mut Grid) -> Result<SolveReport, MazeError> {
        let start = grid.require_start()?;
        grid.require_end()?;

        if self.config.reset_overlays {
            let cleared = grid.clear_overlays();
            if cleared > 0 {
                log::debug!("cleared {} overlay cells before solving", cleared);
            }
        }

        let report = backtrack::search(grid, start, &self.config.directions);
        match &report.path {
            Some(path) => log::debug!(
                "solved {}x{} maze: path of {} cells, {} explored, {} dead ends",
                grid.width(),
                grid.height(),
                path.len(),
                report.explored,
                report.dead_ends
            ),
            None => log::debug!(
                "{}x{} maze is unsolvable: {} explored, {} dead ends",
                grid.width(),
                grid.height(),
                report.explored,
                report.dead_ends
            ),
        }
        Ok(report)
    }

    /// Solve a copy, leaving `grid` untouched
    pub fn solve_copy(&self, grid: &Grid) -> Result<(Grid, SolveReport), MazeError> {
        let mut working = grid.clone();
        let report = self.solve(&mut working)?;
        Ok((working, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{text, CellState, Marker, Position};

    fn maze(rows: &[&str]) -> Grid {
        let mut source = format!("{}\n{}\n", rows[0].len(), rows.len());
        for row in rows {
            source.push_str(row);
            source.push('\n');
        }
        text::parse(&source).unwrap()
    }

    #[test]
    fn test_straight_corridor() {
        let mut grid = maze(&[
            "S   E",
            "%%%%%",
            "%%%%%",
            "%%%%%",
            "%%%%%",
        ]);
        let report = Solver::new().solve(&mut grid).unwrap();

        assert_eq!(report.path_len(), 5);
        assert_eq!(report.dead_ends, 0);
        assert_eq!(grid.count(CellState::DeadEnd), 0);
        assert_eq!(grid.count(CellState::OnPath), 3);
        assert_eq!(grid.to_string().lines().next(), Some("S***E"));
    }

    #[test]
    fn test_enclosed_start_fails_immediately() {
        let mut grid = maze(&[
            "S% ",
            "%  ",
            "  E",
        ]);
        let report = Solver::new().solve(&mut grid).unwrap();

        assert!(!report.is_solved());
        assert_eq!(report.explored, 1);
        assert_eq!(report.dead_ends, 0);
        assert_eq!(grid.cell_at(Position::new(0, 0)), Ok(CellState::Start));
        assert_eq!(grid.count(CellState::DeadEnd), 0);
    }

    #[test]
    fn test_pinned_order_snakes_through_open_room() {
        let mut grid = maze(&[
            "S  ",
            "   ",
            "  E",
        ]);
        let report = Solver::new().solve(&mut grid).unwrap();

        let expected: Vec<Position> = [(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2)]
            .into_iter()
            .map(|(r, c)| Position::new(r, c))
            .collect();
        assert_eq!(report.path, Some(expected));
        assert_eq!(report.dead_ends, 0);
    }

    #[test]
    fn test_custom_order_changes_path() {
        let mut grid = maze(&[
            "S  ",
            "   ",
            "  E",
        ]);
        let solver = Solver::with_config(SolverConfig {
            directions: [
                Direction::Right,
                Direction::Down,
                Direction::Up,
                Direction::Left,
            ],
            ..SolverConfig::default()
        });
        let report = solver.solve(&mut grid).unwrap();

        let expected: Vec<Position> = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
            .into_iter()
            .map(|(r, c)| Position::new(r, c))
            .collect();
        assert_eq!(report.path, Some(expected));
    }

    #[test]
    fn test_abandoned_branch_becomes_dead_end() {
        let mut grid = maze(&[
            "S  ",
            " %E",
        ]);
        let report = Solver::new().solve(&mut grid).unwrap();

        assert!(report.is_solved());
        assert_eq!(report.dead_ends, 1);
        assert_eq!(grid.to_string(), "S**\n~%E\n");
    }

    #[test]
    fn test_unsolvable_marks_reachable_cells() {
        let mut grid = maze(&["S %  E"]);
        let report = Solver::new().solve(&mut grid).unwrap();

        assert!(!report.is_solved());
        assert_eq!(report.path_len(), 0);
        assert_eq!(grid.to_string(), "S~%  E\n");
    }

    #[test]
    fn test_missing_marker() {
        let mut grid = maze(&["S  "]);
        assert_eq!(
            Solver::new().solve(&mut grid),
            Err(MazeError::MissingMarker(Marker::End))
        );

        let mut grid = maze(&["  E"]);
        assert_eq!(
            Solver::new().solve(&mut grid),
            Err(MazeError::MissingMarker(Marker::Start))
        );
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let mut grid = maze(&[
            "S % ",
            "  % ",
            "%   ",
            "  %E",
        ]);
        let solver = Solver::new();
        let first = solver.solve(&mut grid).unwrap();
        let snapshot = grid.clone();
        let second = solver.solve(&mut grid).unwrap();

        assert!(first.is_solved());
        assert_eq!(first, second);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_solve_copy_leaves_input_alone() {
        let grid = maze(&["S E"]);
        let (solved, report) = Solver::new().solve_copy(&grid).unwrap();

        assert!(report.is_solved());
        assert_eq!(grid.count(CellState::OnPath), 0);
        assert_eq!(solved.count(CellState::OnPath), 1);
    }
}
