use std::collections::VecDeque;

use wardpath_core::{Bounds, Cell};

use crate::traits::Pather;

/// Sentinel value meaning "unreachable" in distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Breadth-first step counts from a single source cell.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    bounds: Bounds,
    source: Cell,
    dist: Vec<i32>,
    reached: usize,
}

impl DistanceMap {
    /// Compute a breadth-first search distance map from `source`.
    ///
    /// Each step has cost 1. If `source` is out of bounds or not passable
    /// the map is empty.
    pub fn bfs<P: Pather>(pather: &P, source: Cell) -> Self {
        let bounds = pather.bounds();
        let mut map = Self {
            bounds,
            source,
            dist: vec![UNREACHABLE; bounds.len()],
            reached: 0,
        };

        let Some(si) = bounds.index(source) else {
            return map;
        };
        if !pather.passable(source) {
            return map;
        }

        let mut queue: VecDeque<(Cell, usize)> = VecDeque::new();
        map.dist[si] = 0;
        map.reached = 1;
        queue.push_back((source, si));

        let mut nbuf = Vec::with_capacity(4);

        while let Some((cp, ci)) = queue.pop_front() {
            let nd = map.dist[ci] + 1;

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = bounds.index(np) else {
                    continue;
                };
                if map.dist[ni] != UNREACHABLE {
                    continue;
                }
                map.dist[ni] = nd;
                map.reached += 1;
                queue.push_back((np, ni));
            }
        }

        map
    }

    /// The cell the distances are measured from.
    #[inline]
    pub fn source(&self) -> Cell {
        self.source
    }

    /// Steps from the source to `c`, or `None` if `c` was not reached.
    pub fn at(&self, c: Cell) -> Option<i32> {
        let i = self.bounds.index(c)?;
        let d = self.dist[i];
        (d != UNREACHABLE).then_some(d)
    }

    /// Row-major iterator over every reached cell and its distance.
    pub fn reached(&self) -> impl Iterator<Item = (Cell, i32)> + '_ {
        self.bounds
            .iter()
            .zip(self.dist.iter().copied())
            .filter(|&(_, d)| d != UNREACHABLE)
    }

    /// Number of reached cells, source included.
    #[inline]
    pub fn len(&self) -> usize {
        self.reached
    }

    /// Whether nothing was reached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reached == 0
    }
}

/// Shortest number of steps between two cells, or `None` if unreachable.
pub fn bfs_distance<P: Pather>(pather: &P, from: Cell, to: Cell) -> Option<i32> {
    DistanceMap::bfs(pather, from).at(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardpath_core::FloorGrid;

    #[test]
    fn corridor_distances() {
        let g = FloorGrid::parse("00000").unwrap();
        let m = DistanceMap::bfs(&g, Cell::new(0, 1));
        assert_eq!(m.at(Cell::new(0, 1)), Some(0));
        assert_eq!(m.at(Cell::new(0, 0)), Some(1));
        assert_eq!(m.at(Cell::new(0, 4)), Some(3));
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn walls_split_regions() {
        let g = FloorGrid::parse(
            "\
000
111
000",
        )
        .unwrap();
        let m = DistanceMap::bfs(&g, Cell::new(0, 0));
        assert_eq!(m.len(), 3);
        assert_eq!(m.at(Cell::new(2, 0)), None);
        assert_eq!(m.at(Cell::new(1, 0)), None);
        let cells: Vec<Cell> = m.reached().map(|(c, _)| c).collect();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
        assert_eq!(bfs_distance(&g, Cell::new(0, 0), Cell::new(2, 2)), None);
    }

    #[test]
    fn detour_around_wall() {
        let g = FloorGrid::parse(
            "\
000
010
000",
        )
        .unwrap();
        assert_eq!(bfs_distance(&g, Cell::new(1, 0), Cell::new(1, 2)), Some(4));
    }

    #[test]
    fn invalid_source_gives_empty_map() {
        let g = FloorGrid::parse("010").unwrap();
        assert!(DistanceMap::bfs(&g, Cell::new(0, 1)).is_empty());
        assert!(DistanceMap::bfs(&g, Cell::new(5, 5)).is_empty());
        assert_eq!(DistanceMap::bfs(&g, Cell::new(5, 5)).at(Cell::new(0, 0)), None);
    }
}
