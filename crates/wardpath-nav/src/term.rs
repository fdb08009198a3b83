//! Crossterm terminal driver.
//!
//! Provides a [`TermDriver`] that implements [`Driver`], painting glyph
//! frames to the terminal and turning key and mouse events into [`Msg`]s.

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::app::Driver;
use crate::msg::{Key, MouseAction, Msg};
use crate::render::{Frame, Role};

/// Foreground and background colours for a glyph role.
fn role_colors(role: Role) -> (Color, Color) {
    const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const GRAY: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    const LIGHT_BLUE: Color = Color::Rgb {
        r: 173,
        g: 216,
        b: 230,
    };
    const LIGHT_GREEN: Color = Color::Rgb {
        r: 144,
        g: 238,
        b: 144,
    };
    const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    const RED: Color = Color::Rgb { r: 220, g: 0, b: 0 };
    const GREEN: Color = Color::Rgb { r: 0, g: 160, b: 0 };

    match role {
        Role::Text => (Color::Reset, Color::Reset),
        Role::Status => (Color::Yellow, Color::Reset),
        Role::Floor => (GRAY, WHITE),
        Role::Wall => (GRAY, BLACK),
        Role::Room => (GRAY, LIGHT_BLUE),
        Role::Special => (GRAY, LIGHT_GREEN),
        Role::Explored => (ORANGE, WHITE),
        Role::Path => (WHITE, RED),
        Role::Start => (WHITE, GREEN),
        Role::Goal => (WHITE, RED),
        Role::Cursor => (BLACK, Color::Yellow),
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one terminal event. Events the navigator ignores map to `None`.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
            to_key(code).map(Msg::KeyDown)
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                x: me.column as i32,
                y: me.row as i32,
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct TermDriver {
    mouse_enabled: bool,
}

impl TermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for TermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for TermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(&mut self, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(Duration::from_millis(16))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                let mut stdout = io::stdout();
                execute!(stdout, terminal::Clear(ClearType::All))?;
            }
            if let Some(m) = to_msg(ev) {
                out.push(m);
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout();

        for fc in &frame.cells {
            let (fg, bg) = role_colors(fc.glyph.role);
            queue!(
                stdout,
                cursor::MoveTo(fc.x as u16, fc.y as u16),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(fc.glyph.ch)
            )?;
        }
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
