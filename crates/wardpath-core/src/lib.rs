//! **wardpath-core**: floor-plan grids and cell geometry.
//!
//! This crate provides the foundational types shared by the *wardpath*
//! workspace: `(row, col)` cell coordinates, grid bounds, the immutable
//! [`FloorGrid`] of [`Tile`] categories, and the built-in hospital floor
//! plan with its landmarks.

pub mod floorplan;
pub mod geom;
pub mod grid;

pub use floorplan::{Landmark, hospital, landmark, landmark_at};
pub use geom::{Bounds, Cell, ParseCellError};
pub use grid::{FloorGrid, GridError, Tile};
