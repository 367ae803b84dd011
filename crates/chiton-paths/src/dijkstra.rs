use std::collections::BinaryHeap;
use std::fmt;

use chiton_core::{Grid, Point};

use crate::PathRange;
use crate::pathrange::{Node, NodeRef, Path, PathNode, UNREACHABLE};
use crate::pather::GridPather;
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute a multi-source Dijkstra distance map.
    ///
    /// Every source starts at cost 0. Expansion stops when the cumulative
    /// cost exceeds `max_cost`. Returns a slice of all reached nodes in the
    /// order they were finalized, so costs are non-decreasing.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: u64,
    ) -> &[PathNode] {
        let cur_gen = self.begin();
        self.dist.fill(UNREACHABLE);
        self.results.clear();
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                self.seed(si, cur_gen);
                open.push(NodeRef { idx: si, g: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;
            self.dist[ci] = current_g;

            let cp = self.point(ci);
            self.results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let tentative = current_g.saturating_add(u64::from(pather.cost(cp, np)));
                if tentative > max_cost {
                    continue;
                }
                if let Some(ni) = self.relax(ci, np, tentative, cur_gen) {
                    open.push(NodeRef { idx: ni, g: tentative });
                }
            }
        }

        self.nbuf = nbuf;
        log::debug!(
            "dijkstra_map: {} sources, {} cells reached",
            sources.len(),
            self.results.len()
        );
        &self.results
    }

    /// Query the Dijkstra cost at a specific point.
    ///
    /// Reads the map built by the last [`dijkstra_map`](Self::dijkstra_map)
    /// call; [`dijkstra_path`](Self::dijkstra_path) leaves it untouched.
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached.
    pub fn dijkstra_at(&self, p: Point) -> u64 {
        match self.idx(p) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    /// Compute the lowest-cost path from `from` to `to`.
    ///
    /// Uniform-cost search with a binary-heap frontier. The search stops as
    /// soon as `to` is finalized. The cost of `from` itself is never charged.
    pub fn dijkstra_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Path, PathError> {
        let start_idx = self.idx(from).ok_or(PathError::OutOfRange(from))?;
        let goal_idx = self.idx(to).ok_or(PathError::OutOfRange(to))?;

        let cur_gen = self.begin();
        self.seed(start_idx, cur_gen);
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            g: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut finalized = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            self.nodes[ci].open = false;
            finalized += 1;

            if ci == goal_idx {
                break 'search true;
            }

            let current_g = self.nodes[ci].g;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let tentative = current_g.saturating_add(u64::from(pather.cost(cp, np)));
                if let Some(ni) = self.relax(ci, np, tentative, cur_gen) {
                    open.push(NodeRef { idx: ni, g: tentative });
                }
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::debug!("dijkstra_path {from} -> {to}: unreachable after {finalized} cells");
            return Err(PathError::Unreachable { from, to });
        }

        let cost = self.nodes[goal_idx].g;
        let mut points = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            points.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        points.reverse();

        log::debug!(
            "dijkstra_path {from} -> {to}: cost {cost}, {} steps, {finalized} cells finalized",
            points.len() - 1
        );
        Ok(Path { cost, points })
    }

    fn seed(&mut self, idx: usize, cur_gen: u32) {
        self.nodes[idx] = Node {
            g: 0,
            parent: usize::MAX,
            generation: cur_gen,
            open: true,
        };
    }

    /// Offer `tentative` as the cost of reaching `np` through node `from`.
    ///
    /// Returns the neighbor's index when its distance improved and it needs
    /// to be (re)queued. Finalized nodes are never touched.
    fn relax(&mut self, from: usize, np: Point, tentative: u64, cur_gen: u32) -> Option<usize> {
        let ni = self.idx(np)?;
        let n = &mut self.nodes[ni];
        if n.generation == cur_gen {
            if !n.open || tentative >= n.g {
                return None;
            }
        } else {
            n.generation = cur_gen;
        }
        n.g = tentative;
        n.parent = from;
        n.open = true;
        Some(ni)
    }
}

/// Lowest total cost from the top-left to the bottom-right corner of `grid`,
/// moving in the four cardinal directions and paying each entered cell's
/// cost.
pub fn shortest_path_cost(grid: &Grid) -> Result<u64, PathError> {
    shortest_path(grid).map(|p| p.cost)
}

/// Like [`shortest_path_cost`], but also returns the route taken.
pub fn shortest_path(grid: &Grid) -> Result<Path, PathError> {
    let mut pr = PathRange::new(grid.bounds());
    pr.dijkstra_path(&GridPather::new(grid), grid.top_left(), grid.bottom_right())
}

// ---------------------------------------------------------------------------
// PathError
// ---------------------------------------------------------------------------

/// Errors returned by path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies outside the search range.
    OutOfRange(Point),
    /// The search exhausted its frontier without finalizing the target.
    Unreachable { from: Point, to: Point },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(p) => write!(f, "path: point {p} is outside the search range"),
            Self::Unreachable { from, to } => write!(f, "path: no route from {from} to {to}"),
        }
    }
}

impl std::error::Error for PathError {}
