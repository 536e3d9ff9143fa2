//! Platform events
//!
//! Raw events as delivered by the windowing layer, already translated out of
//! the windowing SDK's own types. Every event is forwarded unchanged to both
//! the UI layer and the input dispatcher.

/// Identifier of a platform window (main or secondary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u32);

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Any other button, by platform index
    Other(u8),
}

/// Keys the shell and UI layer care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Backspace
    Backspace,
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Space bar
    Space,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Any other key, by platform scancode
    Other(i32),
}

/// A single raw platform event
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user asked the application to quit
    Quit,

    /// A window's close button was pressed
    WindowClosed {
        /// Window being closed
        window: WindowId,
    },

    /// A window's drawable surface changed size (pixels)
    WindowResized {
        /// Resized window
        window: WindowId,
        /// New drawable width
        width: u32,
        /// New drawable height
        height: u32,
    },

    /// A window gained or lost focus
    WindowFocused {
        /// Window whose focus changed
        window: WindowId,
        /// Whether it now has focus
        focused: bool,
    },

    /// Key pressed or released
    KeyInput {
        /// Window with keyboard focus
        window: WindowId,
        /// The key
        key: Key,
        /// Pressed (true) or released (false)
        pressed: bool,
    },

    /// Text character typed
    TextInput {
        /// Window with keyboard focus
        window: WindowId,
        /// Character produced by the keystroke
        ch: char,
    },

    /// Cursor moved, in the window's own pixel coordinates
    MouseMoved {
        /// Window under the cursor
        window: WindowId,
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
    },

    /// Mouse button pressed or released
    MouseButton {
        /// Window under the cursor
        window: WindowId,
        /// The button
        button: MouseButton,
        /// Pressed (true) or released (false)
        pressed: bool,
    },

    /// Scroll wheel moved
    MouseWheel {
        /// Window under the cursor
        window: WindowId,
        /// Horizontal delta
        delta_x: f64,
        /// Vertical delta
        delta_y: f64,
    },
}

impl PlatformEvent {
    /// Whether this event ends the application
    ///
    /// Closing a secondary window does not.
    pub fn is_termination(&self, main_window: WindowId) -> bool {
        match self {
            Self::Quit => true,
            Self::WindowClosed { window } => *window == main_window,
            _ => false,
        }
    }
}
