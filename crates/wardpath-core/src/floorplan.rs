//! The built-in hospital floor plan and its labelled landmarks.

use crate::geom::Cell;
use crate::grid::FloorGrid;

/// Hospital floor plan, 15 rows by 20 columns.
pub const HOSPITAL: &str = "\
11111111111111111111
10001222100000122221
10001222100000122221
10000000000000000001
12211100000011100001
12213300000012200001
12213300000012200001
10000000000000000001
10000000111000001111
12221000133000221221
12221000133000221221
12221000111000221221
10000000000000000001
10000000000000000001
11111111111111111111";

/// A named place on the floor plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Landmark {
    pub name: &'static str,
    pub cell: Cell,
}

const fn lm(name: &'static str, row: i32, col: i32) -> Landmark {
    Landmark {
        name,
        cell: Cell::new(row, col),
    }
}

/// Labelled landmarks of [`HOSPITAL`].
pub const LANDMARKS: [Landmark; 9] = [
    lm("Ward A", 1, 5),
    lm("Ward B", 1, 16),
    lm("Lab", 4, 1),
    lm("OR", 5, 4),
    lm("ICU", 5, 13),
    lm("Emergency", 9, 1),
    lm("Radiology", 9, 9),
    lm("Pharmacy", 9, 15),
    lm("Reception", 9, 17),
];

/// Build the hospital floor plan.
pub fn hospital() -> FloorGrid {
    // The constant is checked by the tests below.
    match FloorGrid::parse(HOSPITAL) {
        Ok(g) => g,
        Err(e) => unreachable!("built-in floor plan is invalid: {e}"),
    }
}

/// Look up a landmark by name, ignoring case and surrounding whitespace.
pub fn landmark(name: &str) -> Option<&'static Landmark> {
    let name = name.trim();
    LANDMARKS.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// The landmark placed at `cell`, if any.
pub fn landmark_at(cell: Cell) -> Option<&'static Landmark> {
    LANDMARKS.iter().find(|l| l.cell == cell)
}
