//! Search inputs and outputs.

use std::collections::BTreeSet;
use std::fmt;

use wardpath_core::Cell;

use crate::traits::Pather;

/// Why a search request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    OutOfBounds(Cell),
    /// An endpoint lies on a wall.
    Blocked(Cell),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "cell {c} is outside the floor plan"),
            Self::Blocked(c) => write!(f, "cell {c} is a wall"),
        }
    }
}

impl std::error::Error for SearchError {}

/// A validated pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    pub start: Cell,
    pub goal: Cell,
}

impl SearchRequest {
    /// Check that both endpoints are inside the grid and passable.
    pub fn new<P: Pather>(pather: &P, start: Cell, goal: Cell) -> Result<Self, SearchError> {
        for c in [start, goal] {
            if !pather.bounds().contains(c) {
                return Err(SearchError::OutOfBounds(c));
            }
            if !pather.passable(c) {
                return Err(SearchError::Blocked(c));
            }
        }
        Ok(Self { start, goal })
    }
}

/// Outcome of one search: the path (empty when none exists) and the cells
/// expanded while looking for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Cells from start to goal inclusive.
    pub path: Vec<Cell>,
    /// Every cell popped from the frontier. Diagnostic only.
    pub visited: BTreeSet<Cell>,
}

impl SearchResult {
    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps along the path, or `None` if there is no path.
    #[inline]
    pub fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardpath_core::FloorGrid;

    #[test]
    fn request_validation() {
        let g = FloorGrid::parse("010\n000").unwrap();
        assert!(SearchRequest::new(&g, Cell::new(0, 0), Cell::new(1, 2)).is_ok());
        assert_eq!(
            SearchRequest::new(&g, Cell::new(0, 1), Cell::new(1, 2)),
            Err(SearchError::Blocked(Cell::new(0, 1)))
        );
        assert_eq!(
            SearchRequest::new(&g, Cell::new(0, 0), Cell::new(2, 0)),
            Err(SearchError::OutOfBounds(Cell::new(2, 0)))
        );
    }

    #[test]
    fn hops_counts_steps() {
        let mut r = SearchResult::default();
        assert!(!r.found());
        assert_eq!(r.hops(), None);
        r.path = vec![Cell::new(0, 0)];
        assert_eq!(r.hops(), Some(0));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SearchError::Blocked(Cell::new(4, 4)).to_string(),
            "cell (4, 4) is a wall"
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn result_round_trip() {
        let r = SearchResult {
            path: vec![Cell::new(0, 0), Cell::new(0, 1)],
            visited: [Cell::new(0, 0), Cell::new(0, 1)].into_iter().collect(),
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
