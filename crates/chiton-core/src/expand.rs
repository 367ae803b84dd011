//! Tiling expansion of a cost grid.
//!
//! The full cave is the base grid repeated `factor × factor` times. Each
//! tile to the right of its neighbour, or below it, has every cost raised by
//! one, with costs above 9 wrapping back to 1.

use crate::geom::Point;
use crate::grid::{Grid, GridError, checked_len};

/// Highest cost before wrapping.
pub const MAX_RISK: u32 = 9;

/// Raise a cost by one, wrapping anything above [`MAX_RISK`] back into 1..=9.
#[inline]
pub fn wrap_increment(v: u32) -> u32 {
    let n = v.saturating_add(1);
    if n > MAX_RISK { n - MAX_RISK } else { n }
}

/// Expand `grid` into a `factor × factor` arrangement of incremented tiles.
///
/// Tile `(0, 0)` is a verbatim copy. Tiles on the top row derive from the
/// tile to their left; every other tile derives from the tile above. Each
/// derivation applies [`wrap_increment`] once per step.
pub fn expand(grid: &Grid, factor: usize) -> Result<Grid, GridError> {
    if factor == 0 {
        return Err(GridError::InvalidFactor(factor));
    }
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let (ew, eh) = match (w.checked_mul(factor), h.checked_mul(factor)) {
        (Some(ew), Some(eh)) => (ew, eh),
        (ew, eh) => {
            return Err(GridError::TooLarge {
                width: ew.unwrap_or(usize::MAX),
                height: eh.unwrap_or(usize::MAX),
            });
        }
    };
    let len = checked_len(ew, eh)?;
    log::trace!("expanding {w}x{h} grid by {factor} to {ew}x{eh}");

    let mut cells: Vec<u32> = Vec::with_capacity(len);
    for ey in 0..eh {
        for ex in 0..ew {
            let (tx, ty) = (ex / w, ey / h);
            let v = if tx == 0 && ty == 0 {
                base(grid, ex, ey)
            } else if ty == 0 {
                wrap_increment(cells[ey * ew + ex - w])
            } else {
                wrap_increment(cells[(ey - h) * ew + ex])
            };
            cells.push(v);
        }
    }
    Ok(Grid::from_raw(ew, eh, cells))
}

#[inline]
fn base(grid: &Grid, x: usize, y: usize) -> u32 {
    // (x, y) lies in tile (0, 0), which shares the base grid's bounds.
    grid.at(Point::new(x as i32, y as i32)).unwrap_or_default()
}

impl Grid {
    /// Convenience wrapper for [`expand`].
    pub fn expand(&self, factor: usize) -> Result<Grid, GridError> {
        expand(self, factor)
    }
}
