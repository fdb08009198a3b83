//! The [`FloorGrid`] type, an immutable 2D grid of [`Tile`] categories.
//!
//! Floor plans are written as text, one line per row, each character a tile
//! code (`0` walkable, `1` wall, `2` room, `3` special area):
//!
//! ```text
//! 11111
//! 10201
//! 11111
//! ```

use std::fmt;
use std::str::FromStr;

use crate::geom::{Bounds, Cell};

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// Category of a floor-plan cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Corridors and open floor.
    #[default]
    Walkable,
    /// Impassable.
    Wall,
    /// Patient rooms and wards.
    Room,
    /// Special areas (operating theatre, radiology, ...).
    Special,
}

impl Tile {
    /// All categories in code order.
    pub const ALL: [Tile; 4] = [Tile::Walkable, Tile::Wall, Tile::Room, Tile::Special];

    /// Decode a numeric tile code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Walkable),
            1 => Some(Self::Wall),
            2 => Some(Self::Room),
            3 => Some(Self::Special),
            _ => None,
        }
    }

    /// Numeric tile code, the inverse of [`from_code`](Self::from_code).
    pub const fn code(self) -> u8 {
        match self {
            Self::Walkable => 0,
            Self::Wall => 1,
            Self::Room => 2,
            Self::Special => 3,
        }
    }

    /// Whether a path may cross this tile. Only walls block.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Human-readable name, as shown in legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Walkable => "Walkable",
            Self::Wall => "Wall",
            Self::Room => "Patient Rooms",
            Self::Special => "Special Areas",
        }
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when building a [`FloorGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The plan contained no rows.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character is not a valid tile code.
    InvalidTile { ch: char, row: usize, col: usize },
    /// The tile vector does not match `rows * cols`.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("floor plan: no rows"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "floor plan: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidTile { ch, row, col } => write!(
                f,
                "floor plan: invalid tile \u{201c}{ch}\u{201d} at ({row}, {col})"
            ),
            Self::SizeMismatch { expected, found } => {
                write!(f, "floor plan: expected {expected} tiles, got {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// FloorGrid
// ---------------------------------------------------------------------------

/// An immutable floor plan. Never modified once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFloorGrid"))]
pub struct FloorGrid {
    bounds: Bounds,
    tiles: Vec<Tile>,
}

/// Deserialized form of [`FloorGrid`], validated by [`FloorGrid::from_tiles`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFloorGrid {
    bounds: Bounds,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFloorGrid> for FloorGrid {
    type Error = GridError;

    fn try_from(raw: RawFloorGrid) -> Result<Self, GridError> {
        Self::from_tiles(raw.bounds.rows, raw.bounds.cols, raw.tiles)
    }
}

impl FloorGrid {
    /// Build a grid from a row-major tile vector.
    pub fn from_tiles(rows: i32, cols: i32, tiles: Vec<Tile>) -> Result<Self, GridError> {
        let bounds = Bounds::new(rows, cols);
        if bounds.is_empty() {
            return Err(GridError::Empty);
        }
        if tiles.len() != bounds.len() {
            return Err(GridError::SizeMismatch {
                expected: bounds.len(),
                found: tiles.len(),
            });
        }
        Ok(Self { bounds, tiles })
    }

    /// A grid of the given size filled with `tile`.
    pub fn filled(rows: i32, cols: i32, tile: Tile) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            tiles: vec![tile; bounds.len()],
        }
    }

    /// Parse a text floor plan. See the module docs for the format.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut tiles = Vec::new();
        let mut width: Option<usize> = None;
        let mut rows = 0usize;

        for line in s.lines() {
            let codes: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if codes.is_empty() {
                continue;
            }
            let expected = *width.get_or_insert(codes.len());
            if codes.len() != expected {
                return Err(GridError::Ragged {
                    row: rows,
                    expected,
                    found: codes.len(),
                });
            }
            for (col, &ch) in codes.iter().enumerate() {
                let tile = ch
                    .to_digit(10)
                    .and_then(|d| Tile::from_code(d as u8))
                    .ok_or(GridError::InvalidTile { ch, row: rows, col })?;
                tiles.push(tile);
            }
            rows += 1;
        }

        let cols = width.ok_or(GridError::Empty)?;
        Self::from_tiles(rows as i32, cols as i32, tiles)
    }

    /// The grid extent.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<Tile> {
        self.bounds.index(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is in bounds and not a wall.
    #[inline]
    pub fn is_traversable(&self, c: Cell) -> bool {
        self.at(c).is_some_and(Tile::is_traversable)
    }

    /// Number of cells with the given tile.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Row-major iterator over `(Cell, Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}

impl FromStr for FloorGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FloorGrid {
    /// Writes the plan back in its text format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, t) in self.iter() {
            write!(f, "{}", t.code())?;
            if c.col == self.cols() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn floor_grid_json() {
        let g = FloorGrid::parse("10\n02").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: FloorGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn rejects_tile_count_mismatch() {
        let json = r#"{"bounds":{"rows":2,"cols":2},"tiles":["Wall"]}"#;
        let err = serde_json::from_str::<FloorGrid>(json).unwrap_err();
        assert!(err.to_string().contains("expected 4 tiles, got 1"), "{err}");
    }

    #[test]
    fn rejects_negative_extent() {
        let json = r#"{"bounds":{"rows":-2,"cols":2},"tiles":[]}"#;
        assert!(serde_json::from_str::<FloorGrid>(json).is_err());
    }
}
