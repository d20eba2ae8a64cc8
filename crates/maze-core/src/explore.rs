//! Read-only navigation over a grid.
//!
//! An [`Explorer`] walks a borrowed grid one move at a time, tracking its own
//! position and the cells it has been to. The grid's start marker plays no
//! part; the goal is the grid's end cell.

use crate::{Direction, Grid, MazeError, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Moved to a new cell; `revisit` is set when it had been visited before
    Moved { to: Position, revisit: bool },
    /// Off the grid or into a wall; the position is unchanged
    Blocked,
    /// Already standing on the goal, nothing moves
    AtGoal,
}

pub struct Explorer<'a> {
    grid: &'a Grid,
    goal: Position,
    position: Position,
    visited: HashSet<Position>,
}

impl<'a> Explorer<'a> {
    /// Place an explorer on `position`, which must be a non-wall cell
    pub fn new(grid: &'a Grid, position: Position) -> Result<Self, MazeError> {
        let goal = grid.require_end()?;
        let mut explorer = Self {
            grid,
            goal,
            position,
            visited: HashSet::new(),
        };
        explorer.reset(position)?;
        Ok(explorer)
    }

    /// Place an explorer on the grid's start cell
    pub fn at_start(grid: &'a Grid) -> Result<Self, MazeError> {
        Self::new(grid, grid.require_start()?)
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn at_goal(&self) -> bool {
        self.position == self.goal
    }

    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    pub fn has_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    /// In bounds and not a wall
    pub fn is_valid(&self, pos: Position) -> bool {
        self.grid.is_passable(pos)
    }

    /// Every cell an explorer may be placed on, except the goal
    pub fn allowed_positions(&self) -> Vec<Position> {
        self.grid
            .positions()
            .filter(|&pos| pos != self.goal && self.is_valid(pos))
            .collect()
    }

    /// Move back to `position` and forget the visited set
    pub fn reset(&mut self, position: Position) -> Result<(), MazeError> {
        if self.grid.cell_at(position)?.is_wall() {
            return Err(MazeError::InvalidPosition(position));
        }
        self.position = position;
        self.visited.clear();
        self.visited.insert(position);
        Ok(())
    }

    /// Try one step in `direction`
    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        if self.at_goal() {
            return MoveOutcome::AtGoal;
        }
        match self.grid.neighbor(self.position, direction) {
            Some(next) if self.is_valid(next) => {
                self.position = next;
                let revisit = !self.visited.insert(next);
                MoveOutcome::Moved { to: next, revisit }
            }
            _ => MoveOutcome::Blocked,
        }
    }
}
