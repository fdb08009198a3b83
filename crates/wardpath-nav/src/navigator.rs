//! The navigator session: endpoint selection, search, and display state.
//!
//! Searches are stateless; the session keeps the last outcome so the front
//! end can redraw it until the user clears, resets, or picks a new start.

use std::fmt;

use wardpath_core::{Cell, FloorGrid, landmark_at};
use wardpath_paths::{DistanceMap, SearchResult, search};

use crate::app::Model;
use crate::msg::{Effect, Key, MouseAction, Msg};
use crate::render::{Canvas, MapView, Role};

/// Help line shown under the status line.
pub const HELP_LINE: &str =
    "click/space: select  f/enter: find path  c: clear  r: reset  arrows: move  q: quit";

/// What a successful [`Navigator::select`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// First selection: the start was set.
    Start(Cell),
    /// Second selection: the goal was set.
    Goal(Cell),
    /// Both endpoints were already set: a new start replaced them.
    Restart(Cell),
}

/// Errors reported by navigator actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavError {
    /// The cell is outside the plan or a wall.
    NotTraversable(Cell),
    /// Find was requested before both endpoints were chosen.
    MissingEndpoints,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTraversable(c) => write!(f, "Cannot select {c}: not walkable"),
            Self::MissingEndpoints => f.write_str("Please set both start and goal points!"),
        }
    }
}

impl std::error::Error for NavError {}

/// Interactive navigation state over a fixed floor plan.
#[derive(Debug, Clone)]
pub struct Navigator {
    grid: FloorGrid,
    start: Option<Cell>,
    goal: Option<Cell>,
    outcome: Option<SearchResult>,
    cursor: Cell,
    show_explored: bool,
    landmarks: bool,
    status: String,
}

impl Navigator {
    /// Create a session over `grid`. The cursor starts on the first
    /// walkable cell.
    pub fn new(grid: FloorGrid) -> Self {
        let cursor = grid
            .iter()
            .find(|(_, t)| t.is_traversable())
            .map(|(c, _)| c)
            .unwrap_or(Cell::ZERO);
        Self {
            grid,
            start: None,
            goal: None,
            outcome: None,
            cursor,
            show_explored: true,
            landmarks: false,
            status: "Select a start point".to_string(),
        }
    }

    /// Whether explored cells are drawn (builder).
    pub fn with_explored(mut self, show: bool) -> Self {
        self.show_explored = show;
        self
    }

    /// Whether the built-in landmark list is drawn (builder).
    pub fn with_landmarks(mut self, show: bool) -> Self {
        self.landmarks = show;
        self
    }

    pub fn grid(&self) -> &FloorGrid {
        &self.grid
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    /// The last search outcome, until cleared.
    pub fn outcome(&self) -> Option<&SearchResult> {
        self.outcome.as_ref()
    }

    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// One-line description of the last action.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Status text for a cell, naming the landmark there when the built-in
    /// landmarks are shown.
    fn describe(&self, c: Cell) -> String {
        match landmark_at(c).filter(|_| self.landmarks) {
            Some(l) => format!("Row {}, Col {} ({})", c.row, c.col, l.name),
            None => format!("Row {}, Col {}", c.row, c.col),
        }
    }

    /// Pick a cell. The first pick sets the start, the second the goal, and
    /// a third starts over with a new start.
    pub fn select(&mut self, cell: Cell) -> Result<Selection, NavError> {
        if !self.grid.is_traversable(cell) {
            return Err(NavError::NotTraversable(cell));
        }
        let sel = match (self.start, self.goal) {
            (None, _) => {
                self.start = Some(cell);
                self.status = format!("Start set at: {}", self.describe(cell));
                Selection::Start(cell)
            }
            (Some(_), None) => {
                self.goal = Some(cell);
                self.status = format!("Goal set at: {}", self.describe(cell));
                Selection::Goal(cell)
            }
            (Some(_), Some(_)) => {
                self.start = Some(cell);
                self.goal = None;
                self.outcome = None;
                self.status = format!("New start set at: {}", self.describe(cell));
                Selection::Restart(cell)
            }
        };
        log::info!("{}", self.status);
        Ok(sel)
    }

    /// Search between the chosen endpoints and keep the outcome.
    pub fn find_path(&mut self) -> Result<&SearchResult, NavError> {
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return Err(NavError::MissingEndpoints);
        };
        let result = search(&self.grid, start, goal);
        self.status = match result.hops() {
            Some(hops) => format!(
                "Path found! Length: {hops} steps, {} cells explored",
                result.visited.len()
            ),
            None => format!(
                "No path found! {} cells reachable from start",
                DistanceMap::bfs(&self.grid, start).len()
            ),
        };
        log::info!("{}", self.status);
        let kept: &SearchResult = self.outcome.insert(result);
        Ok(kept)
    }

    /// Drop the outcome but keep the endpoints.
    pub fn clear(&mut self) {
        self.outcome = None;
        self.status = "Path cleared".to_string();
    }

    /// Drop endpoints and outcome.
    pub fn reset(&mut self) {
        self.start = None;
        self.goal = None;
        self.outcome = None;
        self.status = "All selections cleared!".to_string();
        log::info!("{}", self.status);
    }

    /// Move the keyboard cursor, staying inside the plan.
    pub fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let next = self.cursor.shift(drow, dcol);
        if self.grid.contains(next) {
            self.cursor = next;
        }
    }

    fn view(&self, cursor: bool) -> MapView<'_> {
        MapView {
            grid: &self.grid,
            start: self.start,
            goal: self.goal,
            result: self.outcome.as_ref(),
            cursor: cursor.then_some(self.cursor),
            show_explored: self.show_explored,
            landmarks: self.landmarks,
        }
    }

    /// Canvas size `(width, height)` needed by [`draw`](Model::draw).
    pub fn screen_size(&self) -> (i32, i32) {
        let (w, h) = self.view(true).size();
        (w.max(HELP_LINE.len() as i32), h + 3)
    }

    fn report(&mut self, r: Result<(), NavError>) {
        if let Err(e) = r {
            log::debug!("{e}");
            self.status = e.to_string();
        }
    }
}

impl Model for Navigator {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown(key) => match key {
                Key::Char('q') | Key::Char('Q') | Key::Escape => return Some(Effect::End),
                Key::Char('f') | Key::Enter => {
                    let r = self.find_path().map(|_| ());
                    self.report(r);
                }
                Key::Char('c') => self.clear(),
                Key::Char('r') => self.reset(),
                Key::Char(' ') | Key::Space => {
                    let r = self.select(self.cursor).map(|_| ());
                    self.report(r);
                }
                Key::ArrowUp | Key::Char('k') => self.move_cursor(-1, 0),
                Key::ArrowDown | Key::Char('j') => self.move_cursor(1, 0),
                Key::ArrowLeft | Key::Char('h') => self.move_cursor(0, -1),
                Key::ArrowRight | Key::Char('l') => self.move_cursor(0, 1),
                _ => {}
            },
            Msg::Mouse {
                action: MouseAction::Main,
                x,
                y,
            } => {
                let hit = self.view(false).cell_at(x, y);
                if let Some(cell) = hit {
                    self.cursor = cell;
                    let r = self.select(cell).map(|_| ());
                    self.report(r);
                }
            }
            Msg::Mouse {
                action: MouseAction::Secondary,
                ..
            } => self.clear(),
            Msg::Init | Msg::Screen { .. } => {}
        }
        None
    }

    fn draw(&self, canvas: &mut Canvas) {
        let view = self.view(true);
        view.draw(canvas);
        let y = view.size().1 + 1;
        canvas.print(0, y, &self.status, Role::Status);
        canvas.print(0, y + 1, HELP_LINE, Role::Text);
    }
}
