//! Chiton: lowest total risk through a cave of digit costs.
//!
//! [`solve`] runs both puzzle queries: the lowest-risk route across the
//! grid as given, and across the grid tiled by an expansion factor.
//! [`report`] formats the result the way the `chiton` binary prints it.

use std::collections::HashSet;
use std::fmt;

use chiton_core::{Grid, GridError, Point, parse_grid};
use chiton_paths::{Path, PathError, shortest_path};

/// Expansion factor used for the full cave.
pub const DEFAULT_FACTOR: usize = 5;

/// Both puzzle answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    pub part1: u64,
    pub part2: u64,
}

/// The parsed grid and the lowest-risk route for each part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub grid: Grid,
    pub part1: Path,
    pub part2: Path,
}

impl Solution {
    pub fn answers(&self) -> Answers {
        Answers {
            part1: self.part1.cost,
            part2: self.part2.cost,
        }
    }
}

/// Parse `input` and answer both parts, expanding by `factor` for part 2.
pub fn solve(input: &str, factor: usize) -> Result<Solution, Error> {
    let grid = parse_grid(input)?;
    log::info!("loaded {}x{} grid", grid.width(), grid.height());
    let part1 = lowest_risk(&grid)?;
    let part2 = lowest_risk(&grid.expand(factor)?)?;
    Ok(Solution { grid, part1, part2 })
}

/// Answer lines, followed by the drawn part 1 route when `show_path` is set.
pub fn report(solution: &Solution, show_path: bool) -> String {
    let Answers { part1, part2 } = solution.answers();
    let mut out = format!("part 1: {part1}\npart 2: {part2}");
    if show_path {
        out.push_str("\n\n");
        out.push_str(&render_path(&solution.grid, &solution.part1));
    }
    out
}

/// Lowest-risk route from the top-left to the bottom-right corner.
pub fn lowest_risk(grid: &Grid) -> Result<Path, Error> {
    let path = shortest_path(grid)?;
    log::info!(
        "{}x{} cave: risk {} over {} steps",
        grid.width(),
        grid.height(),
        path.cost,
        path.points.len() - 1
    );
    Ok(path)
}

/// Draw `grid` with every cell off `path` replaced by `.`.
pub fn render_path(grid: &Grid, path: &Path) -> String {
    let on_path: HashSet<Point> = path.points.iter().copied().collect();
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for (p, v) in grid.iter() {
        if p.x == 0 && p.y > 0 {
            out.push('\n');
        }
        if on_path.contains(&p) {
            out.push_str(&v.to_string());
        } else {
            out.push('.');
        }
    }
    out
}

/// Errors surfaced by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input could not be turned into a grid.
    Grid(GridError),
    /// The search found no route.
    Path(PathError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::Path(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Path(e) => Some(e),
        }
    }
}

impl From<GridError> for Error {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}
