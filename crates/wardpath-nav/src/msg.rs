//! Input events: [`Msg`], [`Key`], [`MouseAction`], and [`Effect`].

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
}

/// An input message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// A key was pressed.
    KeyDown(Key),
    /// A mouse button was pressed at terminal position `(x, y)`.
    Mouse { action: MouseAction, x: i32, y: i32 },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
}

/// A side-effect returned by a model update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}
