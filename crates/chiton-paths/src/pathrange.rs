use chiton_core::{Point, Range};

/// A position with an associated cost, returned from Dijkstra map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: u64,
}

/// A concrete lowest-cost route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Total cost of every cell entered; the first point is never charged.
    pub cost: u64,
    /// Every point visited, both endpoints included.
    pub points: Vec<Point>,
}

// ---------------------------------------------------------------------------
// Internal node for priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: u64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `g` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) g: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest g first.
        other.g.cmp(&self.g).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "unreachable" in Dijkstra maps.
pub const UNREACHABLE: u64 = u64::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for searches on a grid rectangle.
///
/// `PathRange` owns the node array, distance map and scratch buffers so that
/// repeated queries on same-sized grids incur no allocations after the first.
/// A generation counter lazily invalidates every node at the start of each
/// query; no result ever depends on an earlier query.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) results: Vec<PathNode>,
    pub(crate) dist: Vec<u64>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            nodes: vec![Node::default(); len],
            generation: 0,
            results: Vec::new(),
            dist: vec![UNREACHABLE; len],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are preserved;
    /// the next query's generation bump hides their stale entries.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let old_capacity = self.nodes.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.results.clear();
        self.dist.fill(UNREACHABLE);

        if new_len <= old_capacity {
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
        self.dist.clear();
        self.dist.resize(new_len, UNREACHABLE);
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Start a new query by bumping the generation.
    pub(crate) fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Counter wrapped: stale nodes could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.rng, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = <Range as serde::Deserialize>::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn idx_point_round_trip_with_offset() {
        let pr = PathRange::new(Range::new(2, 3, 6, 8));
        let p = Point::new(4, 5);
        let i = pr.idx(p).unwrap();
        assert_eq!(i, 2 * 4 + 2);
        assert_eq!(pr.point(i), p);
        assert_eq!(pr.idx(Point::new(6, 3)), None);
    }

    #[test]
    fn heap_pops_smallest_first() {
        let mut heap = BinaryHeap::new();
        for (idx, g) in [(0, 7), (1, 2), (2, 9), (3, 2)] {
            heap.push(NodeRef { idx, g });
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|n| n.g).collect();
        assert_eq!(order, vec![2, 2, 7, 9]);
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::new(0, 0, 20, 20));
        let original_cap = pr.nodes.len();

        let small = Range::new(0, 0, 5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.nodes.len(), original_cap);
        assert_eq!(pr.width, 5);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::new(0, 0, 5, 5));
        let big = Range::new(0, 0, 20, 20);
        pr.set_range(big);
        assert_eq!(pr.range(), big);
        assert_eq!(pr.nodes.len(), 400);
        assert_eq!(pr.dist.len(), 400);
    }

    #[test]
    fn begin_survives_generation_wrap() {
        let mut pr = PathRange::new(Range::new(0, 0, 2, 2));
        pr.generation = u32::MAX;
        pr.nodes[0].generation = 1;
        pr.nodes[0].open = true;
        let cur = pr.begin();
        assert_eq!(cur, 1);
        assert_eq!(pr.nodes[0].generation, 0);
        assert!(!pr.nodes[0].open);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn pathrange_round_trip() {
        let rng = Range {
            min: Point::new(1, 2),
            max: Point::new(10, 20),
        };
        let pr = PathRange::new(rng);
        let json = serde_json::to_string(&pr).unwrap();
        let back: PathRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.range(), rng);
        assert_eq!(back.generation, 0);
        assert_eq!(back.dist.len(), rng.len());
    }
}
