//! Maze text format.
//!
//! ```text
//! 5
//! 3
//! S %%%
//! %   %
//! %%% E
//! ```
//!
//! Width on the first line, height on the second, then one line per row.
//! `OnPath` (`*`) and `DeadEnd` (`~`) are written out so solved mazes can be
//! saved and checked later; generator-time `Visited` cells are written as open.

use crate::{CellState, Grid, Marker, MazeError, Position};
use thiserror::Error;

/// Errors from parsing the text format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing {0} line")]
    MissingHeader(&'static str),
    #[error("invalid {field} {value:?}")]
    InvalidHeader { field: &'static str, value: String },
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
    #[error("more than one {marker} cell, second one at {position}")]
    DuplicateMarker { marker: Marker, position: Position },
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Parse a maze from its text form
pub fn parse(source: &str) -> Result<Grid, FormatError> {
    let mut lines = source.lines();
    let width = header(lines.next(), "width")?;
    let height = header(lines.next(), "height")?;
    Grid::area_of(width, height)?;

    let mut rows: Vec<&str> = lines.collect();
    while rows.len() > height && rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    if rows.len() != height {
        return Err(FormatError::RowCount {
            expected: height,
            found: rows.len(),
        });
    }

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(FormatError::RowLength {
                row,
                expected: width,
                found,
            });
        }
    }

    // Rows are checked against the header first so the allocation is bounded by the input
    let mut grid = Grid::new(width, height)?;
    for (row, line) in rows.iter().enumerate() {
        for (col, glyph) in line.chars().enumerate() {
            let state = CellState::from_glyph(glyph)
                .ok_or(FormatError::UnknownGlyph { row, col, glyph })?;
            let position = Position::new(row, col);
            match state {
                CellState::Start if grid.start().is_some() => {
                    return Err(FormatError::DuplicateMarker {
                        marker: Marker::Start,
                        position,
                    });
                }
                CellState::End if grid.end().is_some() => {
                    return Err(FormatError::DuplicateMarker {
                        marker: Marker::End,
                        position,
                    });
                }
                _ => grid.set_cell_at(position, state)?,
            }
        }
    }

    Ok(grid)
}

fn header(line: Option<&str>, field: &'static str) -> Result<usize, FormatError> {
    let line = line.ok_or(FormatError::MissingHeader(field))?;
    line.trim()
        .parse()
        .map_err(|_| FormatError::InvalidHeader {
            field,
            value: line.to_string(),
        })
}

/// Serialize a grid to the text format
pub fn to_text(grid: &Grid) -> String {
    format!("{}\n{}\n{}", grid.width(), grid.height(), grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Generator;

    #[test]
    fn test_parse_sample() {
        let grid = parse("5\n3\nS %%%\n%   %\n%%% E\n").unwrap();

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.end(), Some(Position::new(2, 4)));
        assert_eq!(grid.cell_at(Position::new(1, 2)), Ok(CellState::Open));
        assert_eq!(grid.cell_at(Position::new(0, 2)), Ok(CellState::Wall));
    }

    #[test]
    fn test_generated_maze_round_trips() {
        let grid = Generator::with_seed(11).generate(17, 9).unwrap();
        let text = to_text(&grid);
        assert_eq!(parse(&text).unwrap(), grid);
    }

    #[test]
    fn test_accepts_crlf_and_trailing_blank_lines() {
        let grid = parse("3\r\n1\r\nS E\r\n\r\n\r\n").unwrap();
        assert_eq!(grid.to_string(), "S E\n");
    }

    #[test]
    fn test_accepts_hash_walls() {
        let grid = parse("3\n1\nS#E\n").unwrap();
        assert_eq!(grid.cell_at(Position::new(0, 1)), Ok(CellState::Wall));
        assert_eq!(to_text(&grid), "3\n1\nS%E\n");
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(parse(""), Err(FormatError::MissingHeader("width")));
        assert_eq!(parse("4\n"), Err(FormatError::MissingHeader("height")));
        assert!(matches!(
            parse("four\n2\n"),
            Err(FormatError::InvalidHeader { field: "width", .. })
        ));
        assert!(matches!(
            parse("0\n2\n\n\n"),
            Err(FormatError::Maze(MazeError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_huge_headers_are_rejected() {
        assert!(matches!(
            parse("4294967296\n4294967296\n"),
            Err(FormatError::Maze(MazeError::InvalidDimensions { .. }))
        ));
        assert_eq!(
            parse("100000\n100000\nS E\n"),
            Err(FormatError::RowCount {
                expected: 100000,
                found: 1
            })
        );
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            parse("3\n2\nS E\n"),
            Err(FormatError::RowCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse("3\n1\nS E \n"),
            Err(FormatError::RowLength {
                row: 0,
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            parse("3\n1\nSxE\n"),
            Err(FormatError::UnknownGlyph {
                row: 0,
                col: 1,
                glyph: 'x'
            })
        );
    }

    #[test]
    fn test_duplicate_markers() {
        assert_eq!(
            parse("3\n1\nSSE\n"),
            Err(FormatError::DuplicateMarker {
                marker: Marker::Start,
                position: Position::new(0, 1)
            })
        );
        assert!(matches!(
            parse("3\n1\nESE\n"),
            Err(FormatError::DuplicateMarker {
                marker: Marker::End,
                ..
            })
        ));
    }

    #[test]
    fn test_overlays_survive_text() {
        let grid = parse("4\n1\nS*~E\n").unwrap();
        assert_eq!(grid.count(CellState::OnPath), 1);
        assert_eq!(grid.count(CellState::DeadEnd), 1);
        assert_eq!(to_text(&grid), "4\n1\nS*~E\n");
    }
}
