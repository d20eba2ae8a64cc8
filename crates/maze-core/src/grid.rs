use crate::{Direction, Marker, MazeError};
use serde::{Deserialize, Serialize};

/// A cell coordinate, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two positions share an edge
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single maze cell.
///
/// `OnPath`, `DeadEnd` and `Visited` are overlays written by the solver and the
/// generator while they run; they double as the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Wall,
    Open,
    Start,
    End,
    /// Part of the discovered solution
    OnPath,
    /// Tried by the solver and proven not to lead to the end
    DeadEnd,
    /// Carved by the generator, not yet finalized
    Visited,
}

impl CellState {
    /// Character used by the maze text format
    pub fn glyph(self) -> char {
        match self {
            CellState::Wall => '%',
            CellState::Open | CellState::Visited => ' ',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::OnPath => '*',
            CellState::DeadEnd => '~',
        }
    }

    /// Parse a text-format character. `#` is accepted as an alternative wall glyph.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '%' | '#' => Some(CellState::Wall),
            ' ' => Some(CellState::Open),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            '*' => Some(CellState::OnPath),
            '~' => Some(CellState::DeadEnd),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// Solver and generator bookkeeping states
    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            CellState::OnPath | CellState::DeadEnd | CellState::Visited
        )
    }
}

/// Rectangular maze grid with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Grid {
    /// Create a grid with every cell set to `Wall`
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let area = Self::area_of(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Wall; area],
            start: None,
            end: None,
        })
    }

    /// Cell count of a `width` x `height` grid; zero or overflowing sizes are rejected
    pub(crate) fn area_of(width: usize, height: usize) -> Result<usize, MazeError> {
        match width.checked_mul(height) {
            Some(area) if area > 0 => Ok(area),
            _ => Err(MazeError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Start position, or `MissingMarker` when absent
    pub fn require_start(&self) -> Result<Position, MazeError> {
        self.start.ok_or(MazeError::MissingMarker(Marker::Start))
    }

    /// End position, or `MissingMarker` when absent
    pub fn require_end(&self) -> Result<Position, MazeError> {
        self.end.ok_or(MazeError::MissingMarker(Marker::End))
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn check(&self, pos: Position) -> Result<usize, MazeError> {
        if self.in_bounds(pos) {
            Ok(self.idx(pos))
        } else {
            Err(MazeError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn idx(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    pub fn cell_at(&self, pos: Position) -> Result<CellState, MazeError> {
        let idx = self.check(pos)?;
        Ok(self.cells[idx])
    }

    /// Write a cell state.
    ///
    /// `Start` and `End` go through [`Grid::set_start`] and [`Grid::set_end`] so
    /// that at most one of each exists. Overwriting the current start or end
    /// cell with any other state removes that marker.
    pub fn set_cell_at(&mut self, pos: Position, state: CellState) -> Result<(), MazeError> {
        let idx = self.check(pos)?;
        match state {
            CellState::Start => return self.set_start(pos),
            CellState::End => return self.set_end(pos),
            _ => {}
        }
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.end == Some(pos) {
            self.end = None;
        }
        self.cells[idx] = state;
        Ok(())
    }

    /// Move the start marker, reopening the previous start cell
    pub fn set_start(&mut self, pos: Position) -> Result<(), MazeError> {
        let idx = self.check(pos)?;
        if self.end == Some(pos) {
            return Err(MazeError::MarkerConflict(pos));
        }
        if let Some(old) = self.start.filter(|&old| old != pos) {
            let old_idx = self.idx(old);
            self.cells[old_idx] = CellState::Open;
        }
        self.cells[idx] = CellState::Start;
        self.start = Some(pos);
        Ok(())
    }

    /// Move the end marker, reopening the previous end cell
    pub fn set_end(&mut self, pos: Position) -> Result<(), MazeError> {
        let idx = self.check(pos)?;
        if self.start == Some(pos) {
            return Err(MazeError::MarkerConflict(pos));
        }
        if let Some(old) = self.end.filter(|&old| old != pos) {
            let old_idx = self.idx(old);
            self.cells[old_idx] = CellState::Open;
        }
        self.cells[idx] = CellState::End;
        self.end = Some(pos);
        Ok(())
    }

    /// Unchecked read for callers that already hold an in-bounds position
    pub(crate) fn get(&self, pos: Position) -> CellState {
        self.cells[self.idx(pos)]
    }

    /// Unchecked write that leaves the start/end bookkeeping alone
    pub(crate) fn set_unchecked(&mut self, pos: Position, state: CellState) {
        let idx = self.idx(pos);
        self.cells[idx] = state;
    }

    /// The in-bounds neighbour one step away, if any
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// In-bounds neighbours in [`Direction::ALL`] order
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir))
    }

    /// Whether `pos` is in bounds and not a wall
    pub fn is_passable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.get(pos).is_wall()
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Rows of cell states, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of non-wall cells
    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_wall()).count()
    }

    /// Turn every overlay cell back into `Open`, returning how many changed
    pub fn clear_overlays(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_overlay()) {
            *cell = CellState::Open;
            cleared += 1;
        }
        cleared
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
