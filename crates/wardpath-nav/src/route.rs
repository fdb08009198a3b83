//! Headless route planning: one search, printed as text or JSON.

use wardpath_core::{Cell, FloorGrid};
use wardpath_paths::{SearchError, SearchRequest, SearchResult};

use crate::render::{Canvas, MapView};

/// A finished route query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteReport {
    #[serde(flatten)]
    pub request: SearchRequest,
    pub found: bool,
    pub hops: Option<usize>,
    #[serde(flatten)]
    pub result: SearchResult,
}

/// Validate the endpoints and search between them.
pub fn plan_route(grid: &FloorGrid, start: Cell, goal: Cell) -> Result<RouteReport, SearchError> {
    let request = SearchRequest::new(grid, start, goal)?;
    let result = request.run(grid);
    Ok(RouteReport {
        request,
        found: result.found(),
        hops: result.hops(),
        result,
    })
}

impl RouteReport {
    /// The floor plan with the route drawn on it, followed by a summary.
    pub fn to_text(&self, grid: &FloorGrid, show_explored: bool, landmarks: bool) -> String {
        let view = MapView {
            grid,
            start: Some(self.request.start),
            goal: Some(self.request.goal),
            result: Some(&self.result),
            cursor: None,
            show_explored,
            landmarks,
        };
        let (w, h) = view.size();
        let mut canvas = Canvas::new(w, h);
        view.draw(&mut canvas);

        let mut out = canvas.to_text();
        out.push('\n');
        match self.hops {
            Some(hops) => {
                out.push_str(&format!("Path found! Length: {hops} steps\n"));
                let cells: Vec<String> = self.result.path.iter().map(Cell::to_string).collect();
                out.push_str(&format!("Path: {}\n", cells.join(" -> ")));
            }
            None => out.push_str("No path found!\n"),
        }
        out.push_str(&format!("Explored: {} cells\n", self.result.visited.len()));
        out
    }

    /// JSON form of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
