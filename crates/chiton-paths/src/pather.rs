use chiton_core::{Grid, Point};

use crate::traits::{Pather, WeightedPather};

/// Adapts a cost [`Grid`] for searching: 4-directional moves inside the grid,
/// where moving onto a cell costs that cell's value.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
}

impl<'a> GridPather<'a> {
    /// Wrap `grid`.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.grid.contains(n)));
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, to: Point) -> u32 {
        self.grid.at(to).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        let g = chiton_core::parse_grid("12\n34").unwrap();
        let p = GridPather::new(&g);
        let mut buf = Vec::new();
        p.neighbors(Point::ZERO, &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1)]);
    }

    #[test]
    fn interior_has_four_neighbors() {
        let g = chiton_core::parse_grid("111\n111\n111").unwrap();
        let mut buf = Vec::new();
        GridPather::new(&g).neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn cost_is_destination_value() {
        let g = chiton_core::parse_grid("12\n34").unwrap();
        let p = GridPather::new(&g);
        assert_eq!(p.cost(Point::ZERO, Point::new(1, 0)), 2);
        assert_eq!(p.cost(Point::new(1, 1), Point::new(0, 1)), 3);
    }
}
