//! Windowing layer seam
//!
//! Everything the shell needs from the windowing SDK: the main window and
//! its graphics context, event polling, drawable size, buffer swaps and the
//! secondary windows used by detached UI panels.

use crate::events::{PlatformEvent, WindowId};
use crate::foundation::math::Rect;
use crate::ShellError;

/// Windowing layer capabilities consumed by the frame orchestrator
pub trait PlatformBackend {
    /// Identifier of the main window
    fn main_window(&self) -> WindowId;

    /// Take the next pending event, or `None` when the queue is drained
    ///
    /// Implementations must return `None` after a bounded number of calls so
    /// the orchestrator's drain loop terminates every frame.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Current drawable size of the main window, in pixels
    fn drawable_size(&self) -> (u32, u32);

    /// Display density in dots per inch, if the platform reports it
    fn display_dpi(&self) -> Option<f32> {
        None
    }

    /// Whether text entry uses an on-screen keyboard
    fn has_software_keyboard(&self) -> bool {
        false
    }

    /// Show the on-screen keyboard
    fn start_text_input(&mut self) {}

    /// Hide the on-screen keyboard
    fn stop_text_input(&mut self) {}

    /// Window whose graphics context is current on this thread
    fn current_context(&self) -> Option<WindowId>;

    /// Make `window`'s context current, or detach any context for `None`
    fn make_current(&mut self, window: Option<WindowId>) -> Result<(), ShellError>;

    /// Present the main window's back buffer
    fn swap_buffers(&mut self) -> Result<(), ShellError>;

    /// Create a secondary window covering `rect` (UI coordinates, relative
    /// to the main window's client area) sharing the main graphics context
    fn create_viewport_window(&mut self, title: &str, rect: Rect) -> Result<WindowId, ShellError>;

    /// Move/resize a secondary window
    fn update_viewport_window(&mut self, window: WindowId, rect: Rect) -> Result<(), ShellError>;

    /// Destroy a secondary window
    fn destroy_viewport_window(&mut self, window: WindowId);

    /// Present a secondary window's back buffer
    fn swap_viewport(&mut self, window: WindowId) -> Result<(), ShellError>;

    /// Destroy every remaining secondary window
    fn release_viewports(&mut self);

    /// Destroy the main window and shut the windowing subsystem down
    fn shutdown(self: Box<Self>);
}
