//! The model/driver application loop: [`Model`], [`Driver`], [`App`].

use std::error::Error;

use crate::msg::{Effect, Msg};
use crate::render::{Canvas, Frame, compute_frame};

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait briefly for input and append any messages to `out`.
    fn poll_msgs(&mut self, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>>;

    /// Paint a computed frame.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application drawing onto a `width × height` canvas.
    pub fn new(model: M, driver: D, width: i32, height: i32) -> Self {
        Self {
            model,
            driver,
            width,
            height,
        }
    }

    /// The model, e.g. to inspect its final state after [`run`](Self::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the update/draw loop until the model returns [`Effect::End`].
    ///
    /// The driver is closed on every exit path, including errors.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let res = self.event_loop();
        self.driver.close();
        res
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);
        let mut pending = vec![Msg::Init];

        loop {
            let mut needs_draw = false;
            for msg in pending.drain(..) {
                if matches!(msg, Msg::Screen { .. }) {
                    // The driver cleared the screen; repaint everything.
                    prev.invalidate();
                }
                if let Some(Effect::End) = self.model.update(msg) {
                    return Ok(());
                }
                needs_draw = true;
            }

            if needs_draw {
                curr.clear();
                self.model.draw(&mut curr);
                let frame = compute_frame(&prev, &curr);
                if !frame.cells.is_empty() {
                    self.driver.flush(&frame)?;
                }
                std::mem::swap(&mut prev, &mut curr);
            }

            self.driver.poll_msgs(&mut pending)?;
        }
    }
}
