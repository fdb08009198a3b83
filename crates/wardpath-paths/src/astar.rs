use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use wardpath_core::Cell;

use crate::bfs::UNREACHABLE;
use crate::request::{SearchError, SearchRequest, SearchResult};
use crate::traits::AstarPather;

/// Frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first, ties going to the smallest cell in row-major order.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Frontier {
    f: i32,
    g: i32,
    cell: Cell,
    idx: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the shortest path from `start` to `goal` using A*.
///
/// Invalid endpoints (outside the grid or on a wall) yield an empty result;
/// use [`try_search`] to get the reason instead.
pub fn search<P: AstarPather>(pather: &P, start: Cell, goal: Cell) -> SearchResult {
    match SearchRequest::new(pather, start, goal) {
        Ok(req) => req.run(pather),
        Err(e) => {
            log::warn!("search {start} -> {goal} rejected: {e}");
            SearchResult::default()
        }
    }
}

/// Like [`search`], but reports invalid endpoints as an error.
pub fn try_search<P: AstarPather>(
    pather: &P,
    start: Cell,
    goal: Cell,
) -> Result<SearchResult, SearchError> {
    Ok(SearchRequest::new(pather, start, goal)?.run(pather))
}

impl SearchRequest {
    /// Run A* for this request.
    ///
    /// The frontier uses lazy deletion: a cell is pushed again each time its
    /// cost improves and entries whose `g` is out of date are skipped when
    /// popped. All state lives in this call.
    pub fn run<P: AstarPather>(&self, pather: &P) -> SearchResult {
        let Self { start, goal } = *self;
        let bounds = pather.bounds();
        let (Some(start_idx), Some(goal_idx)) = (bounds.index(start), bounds.index(goal)) else {
            return SearchResult::default();
        };

        let len = bounds.len();
        let mut g_score = vec![UNREACHABLE; len];
        let mut parent = vec![usize::MAX; len];
        let mut visited = BTreeSet::new();

        g_score[start_idx] = 0;
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        open.push(Frontier {
            f: pather.estimate(start, goal),
            g: 0,
            cell: start,
            idx: start_idx,
        });

        let mut nbuf = Vec::with_capacity(4);
        let mut pushes = 1usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if current.g > g_score[ci] {
                continue;
            }

            visited.insert(current.cell);

            if ci == goal_idx {
                break 'search true;
            }

            nbuf.clear();
            pather.neighbors(current.cell, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = bounds.index(np) else {
                    continue;
                };
                let tentative_g = current.g + 1;
                if tentative_g >= g_score[ni] {
                    continue;
                }

                g_score[ni] = tentative_g;
                parent[ni] = ci;
                open.push(Frontier {
                    f: tentative_g + pather.estimate(np, goal),
                    g: tentative_g,
                    cell: np,
                    idx: ni,
                });
                pushes += 1;
            }
        };

        log::debug!(
            "astar {start} -> {goal}: found={found}, expanded={}, pushed={pushes}",
            visited.len()
        );

        if !found {
            return SearchResult {
                path: Vec::new(),
                visited,
            };
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(bounds.cell(ci));
            ci = parent[ci];
        }
        path.reverse();
        SearchResult { path, visited }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::{DistanceMap, bfs_distance};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use wardpath_core::{FloorGrid, Tile, hospital, landmark};

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    /// Path starts at `start`, ends at `goal`, moves one orthogonal step at a
    /// time and never crosses a wall.
    fn assert_valid_path(g: &FloorGrid, path: &[Cell], start: Cell, goal: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
        }
        assert!(path.iter().all(|&p| g.is_traversable(p)));
    }

    #[test]
    fn open_three_by_three() {
        let g = FloorGrid::filled(3, 3, Tile::Walkable);
        let r = search(&g, c(0, 0), c(2, 2));
        assert_eq!(r.path, vec![c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]);
        assert_eq!(r.hops(), Some(4));
        // Every cell shares f = 4, so the whole grid is expanded.
        assert_eq!(r.visited.len(), 9);
    }

    #[test]
    fn same_cell_is_single_step_path() {
        let g = FloorGrid::filled(2, 2, Tile::Room);
        let r = search(&g, c(1, 1), c(1, 1));
        assert_eq!(r.path, vec![c(1, 1)]);
        assert_eq!(r.hops(), Some(0));
        assert_eq!(r.visited, [c(1, 1)].into_iter().collect());
    }

    #[test]
    fn discovered_cells_are_not_visited() {
        let g = FloorGrid::filled(3, 3, Tile::Walkable);
        let r = search(&g, c(1, 1), c(1, 2));
        assert_eq!(r.path, vec![c(1, 1), c(1, 2)]);
        // (2,1), (1,0) and (0,1) were pushed but never popped.
        assert_eq!(r.visited, [c(1, 1), c(1, 2)].into_iter().collect());
    }

    #[test]
    fn wall_row_blocks_goal() {
        let g = FloorGrid::parse(
            "\
0000
0300
1111
0000",
        )
        .unwrap();
        let r = search(&g, c(0, 0), c(3, 3));
        assert!(r.path.is_empty());
        assert!(!r.found());
        let upper: BTreeSet<Cell> = (0..2)
            .flat_map(|row| (0..4).map(move |col| c(row, col)))
            .collect();
        assert_eq!(r.visited, upper);
    }

    #[test]
    fn detour_around_obstacle() {
        let g = FloorGrid::parse(
            "\
00000
01110
00020",
        )
        .unwrap();
        let r = search(&g, c(1, 0), c(1, 4));
        assert_valid_path(&g, &r.path, c(1, 0), c(1, 4));
        assert_eq!(r.hops(), Some(6));
        // Tie on f goes to the lower row.
        assert_eq!(r.path[1], c(0, 0));
    }

    #[test]
    fn invalid_endpoints_degrade_to_empty() {
        let g = FloorGrid::parse("010\n000").unwrap();
        assert_eq!(search(&g, c(0, 1), c(1, 1)), SearchResult::default());
        assert_eq!(search(&g, c(0, 0), c(9, 9)), SearchResult::default());
        assert_eq!(search(&g, c(-1, 0), c(0, 0)), SearchResult::default());
        assert_eq!(
            try_search(&g, c(0, 0), c(0, 1)),
            Err(SearchError::Blocked(c(0, 1)))
        );
        assert_eq!(
            try_search(&g, c(0, 0), c(2, 0)),
            Err(SearchError::OutOfBounds(c(2, 0)))
        );
        assert!(try_search(&g, c(0, 0), c(0, 2)).unwrap().found());
    }

    #[test]
    fn hospital_routes_match_bfs() {
        let g = hospital();
        let names = ["Emergency", "Ward B", "Radiology", "Lab", "ICU", "OR"];
        for a in names {
            for b in names {
                let from = landmark(a).unwrap().cell;
                let to = landmark(b).unwrap().cell;
                let r = search(&g, from, to);
                assert_valid_path(&g, &r.path, from, to);
                assert_eq!(
                    r.hops().map(|h| h as i32),
                    bfs_distance(&g, from, to),
                    "{a} -> {b}"
                );
                assert!(r.path.iter().all(|p| r.visited.contains(p)));
            }
        }
    }

    #[test]
    fn deterministic() {
        let g = hospital();
        let from = landmark("Emergency").unwrap().cell;
        let to = landmark("Ward B").unwrap().cell;
        let a = search(&g, from, to);
        let b = search(&g, from, to);
        assert_eq!(a, b);
    }

    fn random_grid(rng: &mut StdRng, rows: i32, cols: i32) -> FloorGrid {
        let tiles = (0..rows * cols)
            .map(|_| match rng.random_range(0..10) {
                0..=2 => Tile::Wall,
                3 => Tile::Room,
                4 => Tile::Special,
                _ => Tile::Walkable,
            })
            .collect();
        FloorGrid::from_tiles(rows, cols, tiles).unwrap()
    }

    #[test]
    fn random_grids_agree_with_bfs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let g = random_grid(&mut rng, 7, 9);
            let open: Vec<Cell> = g
                .iter()
                .filter(|(_, t)| t.is_traversable())
                .map(|(p, _)| p)
                .collect();
            if open.is_empty() {
                continue;
            }
            let start = open[rng.random_range(0..open.len())];
            let goal = open[rng.random_range(0..open.len())];

            let r = search(&g, start, goal);
            let reach = DistanceMap::bfs(&g, start);
            match reach.at(goal) {
                Some(d) => {
                    assert_valid_path(&g, &r.path, start, goal);
                    assert_eq!(r.hops(), Some(d as usize));
                    assert!(r.path.iter().all(|p| r.visited.contains(p)));
                }
                None => {
                    assert!(r.path.is_empty());
                    let component: BTreeSet<Cell> = reach.reached().map(|(p, _)| p).collect();
                    assert_eq!(r.visited, component);
                }
            }
            assert_eq!(r, search(&g, start, goal));
        }
    }
}
