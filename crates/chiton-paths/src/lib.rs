//! Lowest-cost path search over weighted grids.
//!
//! The search is Dijkstra's algorithm with a binary-heap frontier, generic
//! over a [`WeightedPather`] that supplies neighbors and step costs.
//! [`GridPather`] adapts a [`chiton_core::Grid`] so that entering a cell
//! costs that cell's value.
//!
//! All searches go through [`PathRange`], which owns and reuses internal
//! caches. For one-off queries on a whole grid use [`shortest_path_cost`] or
//! [`shortest_path`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |

mod dijkstra;
mod pather;
mod pathrange;
mod traits;

pub use dijkstra::{PathError, shortest_path, shortest_path_cost};
pub use pather::GridPather;
pub use pathrange::{Path, PathNode, PathRange, UNREACHABLE};
pub use traits::{Pather, WeightedPather};
