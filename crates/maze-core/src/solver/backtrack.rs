//! Depth-first search with dead-end marking, driven by an explicit stack.
//!
//! Each frame remembers which direction it tries next, so the walk visits
//! neighbours in exactly the order a recursive formulation would.

use super::SolveReport;
use crate::{CellState, Direction, Grid, Position};

#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Position,
    next: usize,
}

/// Search from `start`, marking `OnPath`/`DeadEnd` cells in place.
///
/// Only `Open` cells are entered and `End` is accepted. The start cell is the
/// root frame; it keeps its `Start` state and is never marked as a dead end.
pub(crate) fn search(grid: &mut Grid, start: Position, order: &[Direction; 4]) -> SolveReport {
    let mut stack = vec![Frame { pos: start, next: 0 }];
    let mut explored = 1;
    let mut dead_ends = 0;

    while let Some(frame) = stack.last_mut() {
        let pos = frame.pos;
        let Some(&dir) = order.get(frame.next) else {
            stack.pop();
            if pos != start {
                grid.set_unchecked(pos, CellState::DeadEnd);
                dead_ends += 1;
                log::trace!("dead end at {}", pos);
            }
            continue;
        };
        frame.next += 1;

        let Some(next) = grid.neighbor(pos, dir) else {
            continue;
        };
        match grid.get(next) {
            CellState::End => {
                let mut path: Vec<Position> = stack.iter().map(|f| f.pos).collect();
                path.push(next);
                grid.set_unchecked(start, CellState::Start);
                return SolveReport {
                    path: Some(path),
                    explored,
                    dead_ends,
                };
            }
            CellState::Open => {
                grid.set_unchecked(next, CellState::OnPath);
                explored += 1;
                stack.push(Frame { pos: next, next: 0 });
            }
            _ => {}
        }
    }

    SolveReport {
        path: None,
        explored,
        dead_ends,
    }
}
