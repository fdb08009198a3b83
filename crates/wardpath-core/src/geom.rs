//! Geometry primitives: [`Cell`] coordinates and grid [`Bounds`].
//!
//! Coordinates are `(row, col)`, 0-indexed, with rows growing downward.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Row grows down, column grows right.
///
/// Ordering is row-major: row first, then column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in expansion order:
    /// right (+col), down (+row), left (−col), up (−row).
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(-1, 0),
        ]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Error returned when a `row,col` string cannot be parsed into a [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellError(String);

impl fmt::Display for ParseCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell \u{201c}{}\u{201d}, expected ROW,COL", self.0)
    }
}

impl std::error::Error for ParseCellError {}

impl FromStr for Cell {
    type Err = ParseCellError;

    /// Parse `"row,col"`, tolerating surrounding parentheses and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError(s.to_string());
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (r, c) = inner.split_once(',').ok_or_else(err)?;
        let row = r.trim().parse().map_err(|_| err())?;
        let col = c.trim().parse().map_err(|_| err())?;
        Ok(Self::new(row, col))
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid: `rows × cols` cells anchored at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawBounds"))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

/// Deserialized form of [`Bounds`], clamped through [`Bounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    rows: i32,
    cols: i32,
}

#[cfg(feature = "serde")]
impl From<RawBounds> for Bounds {
    fn from(raw: RawBounds) -> Self {
        Self::new(raw.rows, raw.cols)
    }
}

impl Bounds {
    /// Create new bounds. Negative extents are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds hold no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the bounds.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the cells in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.bounds.len().saturating_sub(self.next);
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BoundsIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn negative_bounds_are_clamped() {
        let b: Bounds = serde_json::from_str(r#"{"rows":-3,"cols":4}"#).unwrap();
        assert_eq!(b, Bounds::new(0, 4));
        assert_eq!(b.len(), 0);
        assert!(b.is_empty());
    }
}
