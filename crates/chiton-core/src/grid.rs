//! The [`Grid`] type: an immutable rectangular table of cell costs.
//!
//! Cells are stored row-major in a single flat buffer. A `Grid` is never
//! empty: every constructor rejects zero-sized or ragged input with a
//! [`GridError`].

use std::fmt;

use crate::geom::{Point, Range};

/// A non-empty, rectangular 2D grid of `u32` cell costs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct Grid {
    cells: Vec<u32>,
    bounds: Range,
}

impl Grid {
    /// Build a grid from rows of costs.
    ///
    /// Fails with [`GridError::Empty`] if there are no rows or the first row
    /// is empty, and with [`GridError::Ragged`] if any row differs in length
    /// from the first.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(checked_len(width, rows.len())?);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self::from_raw(width, rows.len(), cells))
    }

    /// Build a `width × height` grid by evaluating `f` at every point in
    /// row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl FnMut(Point) -> u32,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        checked_len(width, height)?;
        let bounds = Range::new(0, 0, width as i32, height as i32);
        let cells = bounds.iter().map(f).collect();
        Ok(Self { cells, bounds })
    }

    /// Callers must have validated the size with [`checked_len`].
    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(checked_len(width, height), Ok(cells.len()));
        Self {
            cells,
            bounds: Range::new(0, 0, width as i32, height as i32),
        }
    }

    /// The bounding range of the grid, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells. Never true for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The top-left corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        self.bounds.min
    }

    /// The bottom-right corner (inclusive).
    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.bounds.max.shift(-1, -1)
    }

    /// Cost at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<u32> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(self.cells[p.y as usize * self.width() as usize + p.x as usize])
    }

    /// Iterator over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.cells.chunks_exact(self.width() as usize)
    }

    /// Row-major iterator over `(Point, cost)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, u32)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Sum of costs along the path that goes all the way right along the
    /// top row and then straight down the last column, excluding the start.
    /// The optimum can never exceed it.
    pub fn right_then_down_cost(&self) -> u64 {
        let w = self.width();
        let h = self.height();
        let across = (1..w).filter_map(|x| self.at(Point::new(x, 0)));
        let down = (1..h).filter_map(|y| self.at(Point::new(w - 1, y)));
        across.chain(down).map(u64::from).sum()
    }
}

/// Cell count of a `width × height` grid.
///
/// Each side must fit the `i32` coordinates of [`Range`] and the whole
/// buffer must be allocatable, else [`GridError::TooLarge`].
pub(crate) fn checked_len(width: usize, height: usize) -> Result<usize, GridError> {
    let side = i32::MAX as usize;
    width
        .checked_mul(height)
        .filter(|_| width <= side && height <= side)
        .filter(|len| {
            len.checked_mul(std::mem::size_of::<u32>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(GridError::TooLarge { width, height })
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[u32]>::to_vec).collect()
    }
}

impl fmt::Display for Grid {
    /// Rows of concatenated decimal values, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for v in row {
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when building, parsing or expanding a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No cells at all.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not an ASCII digit.
    InvalidDigit { ch: char, pos: Point },
    /// Expansion factor must be at least 1.
    InvalidFactor(usize),
    /// Dimensions too big to address or allocate. Sides that overflowed
    /// while being computed are reported as `usize::MAX`.
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidDigit { ch, pos } => {
                write!(f, "grid: invalid digit \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::InvalidFactor(n) => {
                write!(f, "grid: expansion factor must be positive, got {n}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid: {width}x{height} is too large")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn from_rows_and_at() {
        let g = sample();
        assert_eq!(g.size(), Point::new(3, 2));
        assert_eq!(g.len(), 6);
        assert_eq!(g.at(Point::new(0, 0)), Some(1));
        assert_eq!(g.at(Point::new(2, 1)), Some(6));
        assert_eq!(g.at(Point::new(3, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
    }

    #[test]
    fn corners() {
        let g = sample();
        assert_eq!(g.top_left(), Point::new(0, 0));
        assert_eq!(g.bottom_right(), Point::new(2, 1));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
        assert_eq!(Grid::from_fn(0, 3, |_| 1), Err(GridError::Empty));
    }

    #[test]
    fn from_fn_rejects_oversized() {
        let wide = i32::MAX as usize + 1;
        assert_eq!(
            Grid::from_fn(wide, 1, |_| 1),
            Err(GridError::TooLarge {
                width: wide,
                height: 1
            })
        );
        assert_eq!(
            Grid::from_fn(usize::MAX, usize::MAX, |_| 1),
            Err(GridError::TooLarge {
                width: usize::MAX,
                height: usize::MAX
            })
        );
    }

    #[test]
    fn checked_len_limits() {
        assert_eq!(checked_len(3, 2), Ok(6));
        let side = i32::MAX as usize;
        // each side fits, but the buffer cannot be allocated
        assert!(matches!(checked_len(side, side), Err(GridError::TooLarge { .. })));
    }

    #[test]
    fn rejects_ragged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "grid: row 1 has 1 cells, expected 2");
    }

    #[test]
    fn from_fn_row_major() {
        let g = Grid::from_fn(3, 2, |p| (p.y * 10 + p.x) as u32).unwrap();
        assert_eq!(Vec::<Vec<u32>>::from(g), vec![vec![0, 1, 2], vec![10, 11, 12]]);
    }

    #[test]
    fn iter_pairs_points_with_costs() {
        let g = sample();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[4], (Point::new(1, 1), 5));
    }

    #[test]
    fn display_rows() {
        assert_eq!(sample().to_string(), "123\n456");
    }

    #[test]
    fn right_then_down() {
        // enters 2, 3, then 6
        assert_eq!(sample().right_then_down_cost(), 11);
        let single = Grid::from_rows(vec![vec![5]]).unwrap();
        assert_eq!(single.right_then_down_cost(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[1,2],[3,4]]");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn ragged_json_rejected() {
        assert!(serde_json::from_str::<Grid>("[[1,2],[3]]").is_err());
    }
}
