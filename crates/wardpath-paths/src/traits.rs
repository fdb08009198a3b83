use wardpath_core::{Bounds, Cell, FloorGrid};

use crate::distance::manhattan;
use crate::neighbors::cardinal;

/// Minimal pathfinding interface. Provides the search area and neighbor
/// enumeration. Every step costs 1.
pub trait Pather {
    /// Extent of the searchable area.
    fn bounds(&self) -> Bounds;

    /// Whether `c` may lie on a path.
    fn passable(&self, c: Cell) -> bool;

    /// Append passable neighbors of `c` into `buf`. The caller clears `buf`
    /// before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with an admissible heuristic, as needed by A*.
pub trait AstarPather: Pather {
    /// Heuristic estimate of the number of steps from `from` to `to`.
    /// Must never overestimate the true distance.
    fn estimate(&self, from: Cell, to: Cell) -> i32;
}

impl Pather for FloorGrid {
    #[inline]
    fn bounds(&self) -> Bounds {
        FloorGrid::bounds(self)
    }

    #[inline]
    fn passable(&self, c: Cell) -> bool {
        self.is_traversable(c)
    }

    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        cardinal(c, |n| self.is_traversable(n), buf);
    }
}

impl AstarPather for FloorGrid {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to)
    }
}
