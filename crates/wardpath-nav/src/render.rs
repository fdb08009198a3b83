//! Screen composition: [`Canvas`], [`Glyph`], diff [`Frame`]s, and the
//! floor-plan view shared by the terminal and headless front-ends.

use wardpath_core::floorplan::LANDMARKS;
use wardpath_core::{Cell, FloorGrid, Tile};
use wardpath_paths::SearchResult;

/// Terminal columns used by one grid cell.
pub const CELL_WIDTH: i32 = 2;

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// What a glyph depicts. Drivers map this to colours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Text,
    Floor,
    Wall,
    Room,
    Special,
    Explored,
    Path,
    Start,
    Goal,
    Cursor,
    Status,
}

/// A character with a role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub role: Role,
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            role: Role::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A fixed-size screen buffer, addressed by terminal `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            glyphs: vec![Glyph::default(); (w * h) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Read the glyph at `(x, y)`; blank if outside.
    pub fn at(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `(x, y)`. No-op if outside.
    pub fn set(&mut self, x: i32, y: i32, g: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = g;
        }
    }

    /// Write `text` starting at `(x, y)`, clipped to the canvas.
    pub fn print(&mut self, x: i32, y: i32, text: &str, role: Role) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, Glyph { ch, role });
        }
    }

    /// Reset every glyph to blank.
    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    /// Mark every glyph so that the next diff repaints the whole screen.
    pub fn invalidate(&mut self) {
        self.glyphs.fill(Glyph {
            ch: '\0',
            role: Role::Text,
        });
    }

    /// Plain-text rendering, one line per row, trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            let line: String = (0..self.width).map(|x| self.at(x, y).ch).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between two canvases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub x: i32,
    pub y: i32,
}

/// The glyphs to repaint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

/// Compute the difference between two same-sized canvases.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let mut cells = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let g = curr.at(x, y);
            if prev.at(x, y) != g {
                cells.push(FrameCell { glyph: g, x, y });
            }
        }
    }
    Frame { cells }
}

// ---------------------------------------------------------------------------
// Floor-plan view
// ---------------------------------------------------------------------------

/// Everything needed to draw the floor plan.
#[derive(Clone, Copy, Debug)]
pub struct MapView<'a> {
    pub grid: &'a FloorGrid,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
    pub result: Option<&'a SearchResult>,
    pub cursor: Option<Cell>,
    pub show_explored: bool,
    /// Whether to list the built-in landmarks next to the legend.
    pub landmarks: bool,
}

fn tile_glyph(t: Tile) -> (&'static str, Role) {
    match t {
        Tile::Walkable => (". ", Role::Floor),
        Tile::Wall => ("##", Role::Wall),
        Tile::Room => ("r ", Role::Room),
        Tile::Special => ("s ", Role::Special),
    }
}

const EXPLORED: (&str, Role) = ("o ", Role::Explored);
const PATH: (&str, Role) = ("* ", Role::Path);
const START: (&str, Role) = ("S ", Role::Start);
const GOAL: (&str, Role) = ("G ", Role::Goal);

impl MapView<'_> {
    /// Width of the map area in terminal columns.
    pub fn map_width(&self) -> i32 {
        self.grid.cols() * CELL_WIDTH
    }

    /// Column where the legend starts.
    pub fn legend_x(&self) -> i32 {
        self.map_width() + 2
    }

    /// Lines of legend text, in display order.
    pub fn legend(&self) -> Vec<(String, Role)> {
        let mut lines = vec![("Legend".to_string(), Role::Text)];
        for t in Tile::ALL {
            let (s, role) = tile_glyph(t);
            lines.push((format!("{s} {}", t.label()), role));
        }
        for ((s, role), label) in [
            (EXPLORED, "Explored"),
            (PATH, "Optimal Path"),
            (START, "Start"),
            (GOAL, "Goal"),
        ] {
            lines.push((format!("{s} {label}"), role));
        }
        if self.landmarks {
            lines.push((String::new(), Role::Text));
            lines.push(("Landmarks".to_string(), Role::Text));
            for l in &LANDMARKS {
                lines.push((format!("{:<10} {}", l.name, l.cell), Role::Text));
            }
        }
        lines
    }

    /// The string and role drawn for a grid cell. Later layers win:
    /// tile, explored, path, endpoints.
    pub fn cell_glyph(&self, c: Cell) -> (&'static str, Role) {
        let mut g = tile_glyph(self.grid.at(c).unwrap_or(Tile::Wall));
        if let Some(r) = self.result {
            if self.show_explored && r.visited.contains(&c) {
                g = EXPLORED;
            }
            if r.path.contains(&c) {
                g = PATH;
            }
        }
        if self.start == Some(c) {
            g = START;
        }
        if self.goal == Some(c) {
            g = GOAL;
        }
        g
    }

    /// Size `(width, height)` of a canvas that fits the map and legend.
    pub fn size(&self) -> (i32, i32) {
        let legend = self.legend();
        let legend_w = legend
            .iter()
            .map(|(s, _)| s.chars().count() as i32)
            .max()
            .unwrap_or(0);
        let h = self.grid.rows().max(legend.len() as i32);
        (self.legend_x() + legend_w, h)
    }

    /// Draw map and legend onto `canvas` with the map's top-left at the origin.
    pub fn draw(&self, canvas: &mut Canvas) {
        for c in self.grid.bounds().iter() {
            let (s, mut role) = self.cell_glyph(c);
            if self.cursor == Some(c) {
                role = Role::Cursor;
            }
            canvas.print(c.col * CELL_WIDTH, c.row, s, role);
        }
        let lx = self.legend_x();
        for (y, (text, role)) in self.legend().into_iter().enumerate() {
            canvas.print(lx, y as i32, &text, role);
        }
    }

    /// Map a terminal position back to a grid cell.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || x >= self.map_width() {
            return None;
        }
        let c = Cell::new(y, x / CELL_WIDTH);
        self.grid.contains(c).then_some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardpath_core::hospital;
    use wardpath_paths::search;

    fn view(grid: &FloorGrid) -> MapView<'_> {
        MapView {
            grid,
            start: None,
            goal: None,
            result: None,
            cursor: None,
            show_explored: true,
            landmarks: false,
        }
    }

    #[test]
    fn canvas_print_clips() {
        let mut c = Canvas::new(4, 1);
        c.print(2, 0, "abc", Role::Text);
        assert_eq!(c.to_text(), "  ab\n");
        assert_eq!(c.at(9, 9), Glyph::default());
    }

    #[test]
    fn frame_diff() {
        let a = Canvas::new(3, 2);
        let mut b = Canvas::new(3, 2);
        b.print(1, 1, "x", Role::Path);
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!((frame.cells[0].x, frame.cells[0].y), (1, 1));
        assert_eq!(frame.cells[0].glyph.role, Role::Path);

        let mut stale = a.clone();
        stale.invalidate();
        assert_eq!(compute_frame(&stale, &a).cells.len(), 6);
    }

    #[test]
    fn layers_override_in_order() {
        let g = FloorGrid::parse("000\n020").unwrap();
        let r = search(&g, Cell::new(0, 0), Cell::new(0, 2));
        let mut v = view(&g);
        v.start = Some(Cell::new(0, 0));
        v.goal = Some(Cell::new(0, 2));
        v.result = Some(&r);
        assert_eq!(v.cell_glyph(Cell::new(0, 0)).1, Role::Start);
        assert_eq!(v.cell_glyph(Cell::new(0, 1)).1, Role::Path);
        assert_eq!(v.cell_glyph(Cell::new(0, 2)).1, Role::Goal);
        assert_eq!(v.cell_glyph(Cell::new(1, 1)).1, Role::Room);
    }

    #[test]
    fn explored_hidden_when_disabled() {
        let g = FloorGrid::parse("000\n000").unwrap();
        let r = search(&g, Cell::new(1, 1), Cell::new(1, 2));
        let mut v = view(&g);
        v.result = Some(&r);
        v.show_explored = false;
        assert_eq!(v.cell_glyph(Cell::new(1, 1)).1, Role::Path);
        let r2 = search(&g, Cell::new(0, 0), Cell::new(1, 2));
        v.result = Some(&r2);
        v.show_explored = true;
        assert!(
            g.bounds()
                .iter()
                .any(|c| v.cell_glyph(c).1 == Role::Explored)
        );
    }

    #[test]
    fn draw_and_hit_test() {
        let g = hospital();
        let mut v = view(&g);
        v.landmarks = true;
        let (w, h) = v.size();
        assert_eq!(h, 20);
        let mut canvas = Canvas::new(w, h);
        v.draw(&mut canvas);
        let text = canvas.to_text();
        assert!(text.starts_with("########################################"));
        assert!(text.contains("Radiology  (9, 9)"));
        assert_eq!(v.cell_at(3, 2), Some(Cell::new(2, 1)));
        assert_eq!(v.cell_at(40, 2), None);
        assert_eq!(v.cell_at(3, 15), None);
    }
}
