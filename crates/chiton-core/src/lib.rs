//! **chiton-core** — cost grids for the chiton cave.
//!
//! This crate provides the foundational types used by the path search and
//! the command-line solver: geometry primitives, an immutable cost grid,
//! digit-grid parsing, and the tiling expansion that builds the full cave.

pub mod expand;
pub mod geom;
pub mod grid;
pub mod parse;

pub use expand::{MAX_RISK, expand, wrap_increment};
pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
pub use parse::{parse_grid, parse_lines};
