//! Digit-grid text parsing.
//!
//! Input is one row per line, one decimal digit per cell. Surrounding
//! whitespace on each line is ignored and blank lines are skipped, so a
//! trailing newline at the end of an input file is harmless.

use std::str::FromStr;

use crate::geom::Point;
use crate::grid::{Grid, GridError};

/// Parse a whole block of text into a [`Grid`].
pub fn parse_grid(input: &str) -> Result<Grid, GridError> {
    parse_lines(input.lines())
}

/// Parse already-split lines into a [`Grid`].
///
/// Positions reported in [`GridError::InvalidDigit`] and row numbers in
/// [`GridError::Ragged`] count only non-blank lines.
pub fn parse_lines<I, S>(lines: I) -> Result<Grid, GridError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rows: Vec<Vec<u32>> = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let y = rows.len() as i32;
        let row = line
            .chars()
            .enumerate()
            .map(|(x, ch)| {
                ch.to_digit(10).ok_or(GridError::InvalidDigit {
                    ch,
                    pos: Point::new(x as i32, y),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Grid::from_rows(rows)
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        parse_grid(s)
    }
}
