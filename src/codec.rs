//! The plain text grid format.
//!
//! ```notrust
//! <name>
//! <rows>
//! <cols>
//! <row 0>
//! ...
//! <row rows-1>
//! ```
//!
//! In a row, `X` is a live cell and any other character is a dead one. Rows shorter than
//! `cols` are padded with dead cells, and missing rows are all dead. Empty lines between rows
//! are skipped.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::grid::Grid;
use crate::grid::GridError;
use crate::parse_util;
use crate::parse_util::ConvertError;

const ALIVE: char = 'X';
const DEAD: char = ' ';

/// Which of the two header lines a [`DecodeError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Rows,
    Cols,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Rows => write!(f, "row count"),
            Dimension::Cols => write!(f, "column count"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Missing grid name")]
    MissingName,

    #[error("Missing {0} line")]
    MissingHeader(Dimension),

    #[error("Invalid {field}: {source}")]
    InvalidHeader {
        field: Dimension,
        #[source]
        source: ConvertError,
    },

    #[error("Invalid {field}: expected a positive integer, found 0")]
    NonPositiveHeader { field: Dimension },

    #[error("Row {row} does not match specified column count. Expected: {expected}, Found: {found}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Parse a grid from its text form.
///
/// Either the whole grid is read, or an error is returned. Lines past the last declared row are
/// ignored.
pub fn read_grid(text: &str) -> Result<Grid, DecodeError> {
    let (Some(name), text) = parse_util::take_line(text) else {
        return Err(DecodeError::MissingName);
    };
    let name = name.trim();

    let (rows, text) = read_dimension(text, Dimension::Rows)?;
    let (cols, mut text) = read_dimension(text, Dimension::Cols)?;

    // Rows that are missing or short stay dead
    let mut cells = Grid::dead_cells(rows, cols)?;

    for row in 0..rows {
        let (line, rest) = parse_util::take_nonblank_line(text);
        text = rest;

        let Some(line) = line else {
            break;
        };

        let found = line.chars().count();
        if found > cols {
            return Err(DecodeError::RowTooLong {
                row: row + 1,
                expected: cols,
                found,
            });
        }

        let start = row * cols;
        for (cell, c) in cells[start..start + cols].iter_mut().zip(line.chars()) {
            *cell = c == ALIVE;
        }
    }

    if let (Some(_), _) = parse_util::take_nonblank_line(text) {
        warn!("Grid \"{name}\" has more than {rows} rows. Ignoring the rest");
    }

    debug!(name, rows, cols, "decoded grid");

    Ok(Grid::from_cells(name, rows, cols, cells)?)
}

fn read_dimension(text: &str, field: Dimension) -> Result<(usize, &str), DecodeError> {
    let (Some(line), text) = parse_util::take_line(text) else {
        return Err(DecodeError::MissingHeader(field));
    };

    let n: usize = parse_util::convert(line)
        .map_err(|source| DecodeError::InvalidHeader { field, source })?;

    if n == 0 {
        return Err(DecodeError::NonPositiveHeader { field });
    }

    Ok((n, text))
}

/// Write a grid in its text form. Every line, including the last row, ends in `\n`.
///
/// Line breaks in the grid name are replaced with spaces so the header stays on one line.
pub fn write_grid(grid: &Grid) -> String {
    let mut s = String::with_capacity((grid.cols() + 1) * grid.rows() + grid.name().len() + 16);

    s.extend(grid.name().chars().map(|c| match c {
        '\r' | '\n' => ' ',
        c => c,
    }));
    s.push('\n');
    s.push_str(&format!("{}\n{}\n", grid.rows(), grid.cols()));

    for row in grid.iter_rows() {
        s.extend(row.iter().map(|&alive| if alive { ALIVE } else { DEAD }));
        s.push('\n');
    }

    s
}

impl Grid {
    /// See [`read_grid`]
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        read_grid(text)
    }

    /// See [`write_grid`]
    pub fn encode(&self) -> String {
        write_grid(self)
    }
}

impl FromStr for Grid {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_grid(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&write_grid(self))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::DecodeError;
    use super::Dimension;
    use crate::grid::Grid;
    use crate::grid::GridError;
    use crate::parse_util::ConvertError;

    #[test]
    fn test_read_blinker() {
        let g: Grid = "Blinker\n3\n3\n X \n X \n X \n".parse().unwrap();

        assert_eq!(g.name(), "Blinker");
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert_eq!(g.population(), 3);
        assert_eq!(g.cell_at(0, 1), Ok(true));
        assert_eq!(g.cell_at(0, 0), Ok(false));
    }

    #[test]
    fn test_short_row_is_padded() {
        let g = Grid::decode("Short\n2\n5\nXXXXX\nXXX\n").unwrap();

        let row: Vec<bool> = (0..5).map(|c| g.cell_at(1, c).unwrap()).collect();
        assert_eq!(row, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_long_row_is_rejected() {
        let err = Grid::decode("Long\n2\n5\nXXXXX\nX    X\n").unwrap_err();

        assert_eq!(
            err,
            DecodeError::RowTooLong {
                row: 2,
                expected: 5,
                found: 6
            }
        );
        assert_eq!(
            err.to_string(),
            "Row 2 does not match specified column count. Expected: 5, Found: 6"
        );
    }

    #[test]
    fn test_missing_rows_are_dead() {
        let g = Grid::decode("Partial\n4\n2\nXX\n").unwrap();

        assert_eq!(g.rows(), 4);
        assert_eq!(g.population(), 2);
        assert_eq!(g.cell_at(3, 1), Ok(false));
    }

    #[test]
    fn test_no_rows_at_all() {
        let g = Grid::decode("Empty\n2\n2").unwrap();

        assert_eq!(g, Grid::new(2, 2).unwrap());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let g = Grid::decode("Gaps\n2\n2\n\n\nX\n\nXX\n").unwrap();

        assert_eq!(g.cell_at(0, 0), Ok(true));
        assert_eq!(g.cell_at(0, 1), Ok(false));
        assert_eq!(g.cell_at(1, 1), Ok(true));
    }

    #[test]
    fn test_whitespace_row_is_a_row() {
        let g = Grid::decode("Spaces\n2\n2\n  \n X\n").unwrap();

        assert_eq!(g.cell_at(0, 1), Ok(false));
        assert_eq!(g.cell_at(1, 1), Ok(true));
    }

    #[test]
    fn test_crlf() {
        let g = Grid::decode("Windows\r\n1\r\n3\r\nX X\r\n").unwrap();

        assert_eq!(g.name(), "Windows");
        assert_eq!(g.population(), 2);
    }

    #[test]
    fn test_extra_rows_are_ignored() {
        let g = Grid::decode("Extra\n1\n1\nX\nXXXXXXXX\n").unwrap();

        assert_eq!(g.rows(), 1);
        assert_eq!(g.population(), 1);
    }

    #[test]
    fn test_huge_dimensions_are_rejected() {
        assert_eq!(
            Grid::decode("Huge\n18446744073709551615\n1\n"),
            Err(DecodeError::Grid(GridError::InvalidDimension {
                rows: usize::MAX,
                cols: 1
            }))
        );
        assert!(matches!(
            Grid::decode("Huge\n1000000000\n1000000000\nX\n"),
            Err(DecodeError::Grid(GridError::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(Grid::decode(""), Err(DecodeError::MissingName));
        assert_eq!(
            Grid::decode("Name\n"),
            Err(DecodeError::MissingHeader(Dimension::Rows))
        );
        assert_eq!(
            Grid::decode("Name\n3\n"),
            Err(DecodeError::MissingHeader(Dimension::Cols))
        );
        assert_eq!(
            Grid::decode("Name\nthree\n3\n"),
            Err(DecodeError::InvalidHeader {
                field: Dimension::Rows,
                source: ConvertError::ParseError {
                    str: "three".to_string()
                }
            })
        );
        assert_eq!(
            Grid::decode("Name\n3\n0\n"),
            Err(DecodeError::NonPositiveHeader {
                field: Dimension::Cols
            })
        );
        assert!(matches!(
            Grid::decode("Name\n-1\n3\n"),
            Err(DecodeError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_write_grid() {
        let g = Grid::decode("Glider\n3\n3\n X\n  X\nXXX\n").unwrap();

        assert_eq!(g.encode(), "Glider\n3\n3\n X \n  X\nXXX\n");
        assert_eq!(g.to_string(), g.encode());
    }

    #[test]
    fn test_write_grid_single_line_name() {
        let g = Grid::new(1, 1).unwrap().with_name("two\nlines");

        assert_eq!(g.encode(), "two lines\n1\n1\n \n");
    }

    proptest! {
        #[test]
        fn encode_then_decode(
            (rows, cols, cells) in (1usize..10, 1usize..10).prop_flat_map(|(rows, cols)| {
                (Just(rows), Just(cols), prop::collection::vec(any::<bool>(), rows * cols))
            })
        ) {
            let g = Grid::from_cells("prop", rows, cols, cells).unwrap();
            let decoded = Grid::decode(&g.encode()).unwrap();

            prop_assert_eq!(&decoded, &g);
            prop_assert_eq!(decoded.name(), "prop");
        }
    }
}
