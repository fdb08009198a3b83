//! Pathfinding over floor-plan grids.
//!
//! - **A\*** shortest-path search ([`search`], [`try_search`]) on a
//!   4-connected grid with unit step costs and the Manhattan heuristic. It
//!   returns the path together with every cell it expanded.
//! - **BFS** distance maps ([`DistanceMap`], [`bfs_distance`]).
//!
//! Each call allocates its own working state; nothing is shared between
//! searches.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`AstarPather`] : [`Pather`] | A* |
//!
//! [`FloorGrid`](wardpath_core::FloorGrid) implements both.

mod astar;
mod bfs;
mod distance;
mod neighbors;
mod request;
mod traits;

pub use astar::{search, try_search};
pub use bfs::{DistanceMap, UNREACHABLE, bfs_distance};
pub use distance::manhattan;
pub use neighbors::cardinal;
pub use request::{SearchError, SearchRequest, SearchResult};
pub use traits::{AstarPather, Pather};
