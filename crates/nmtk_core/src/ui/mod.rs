//! UI layer seam
//!
//! Architecture:
//! - [`UiLayer`]: frame lifecycle and scoped containers, driven by the shell
//! - [`Widgets`]: content surface handed to pages and menu items
//! - [`scope`]: begin/end guards encoding the two pairing rules
//! - [`ImmediateUi`]: the built-in immediate-mode implementation

pub mod scope;
pub mod style;
pub mod viewport;

mod context;

pub use context::ImmediateUi;
pub use scope::{MenuScope, WindowScope};
pub use style::Style;
pub use viewport::{Viewport, ViewportKey};

use crate::config::UiConfigFlags;
use crate::events::PlatformEvent;
use crate::platform::PlatformBackend;
use crate::render::{DrawList, GraphicsBackend};
use crate::ShellError;

/// Widgets a page or menu item can emit into the open container
pub trait Widgets {
    /// Line of text
    fn text(&mut self, text: &str);

    /// Push button; returns true on the frame it was clicked
    fn button(&mut self, label: &str) -> bool;

    /// Checkbox bound to `value`; returns true when toggled
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    /// Single-line text field bound to `buffer`; returns true when edited
    fn input_text(&mut self, label: &str, buffer: &mut String) -> bool;

    /// Horizontal separator
    fn separator(&mut self);

    /// Menu entry; returns true on the frame it was selected
    fn menu_item(&mut self, label: &str) -> bool;
}

/// Immediate-mode UI layer capabilities consumed by the shell
pub trait UiLayer {
    /// Apply feature switches; called once during initialization
    fn configure(&mut self, flags: UiConfigFlags);

    /// Active feature switches
    fn config_flags(&self) -> UiConfigFlags;

    /// Global font scale
    fn set_font_scale(&mut self, scale: f32);

    /// Translate one platform event into UI input state
    fn process_event(&mut self, event: &PlatformEvent);

    /// Whether a text field currently wants keyboard text
    fn wants_text_input(&self) -> bool;

    /// Display size for the coming frame, in pixels
    fn set_display_size(&mut self, width: u32, height: u32);

    /// Start a frame; exactly once per iteration, after the display size
    fn new_frame(&mut self);

    /// Cover the main viewport with a docking area
    fn dock_space_over_viewport(&mut self);

    /// Open a named window; returns false when collapsed or hidden.
    /// [`UiLayer::end_window`] must follow in both cases.
    fn begin_window(&mut self, name: &str) -> bool;

    /// Close the window opened by the last [`UiLayer::begin_window`]
    fn end_window(&mut self);

    /// Open a named menu; returns false when the menu is closed.
    /// [`UiLayer::end_menu`] must follow only when this returned true.
    fn begin_menu(&mut self, name: &str) -> bool;

    /// Close the menu opened by the last successful [`UiLayer::begin_menu`]
    fn end_menu(&mut self);

    /// Content surface for the innermost open container
    fn widgets(&mut self) -> &mut dyn Widgets;

    /// Finalize the frame into draw lists
    fn render(&mut self);

    /// Main viewport draw list produced by the last [`UiLayer::render`]
    fn draw_list(&self) -> &DrawList;

    /// Create, move and destroy secondary platform windows to match the
    /// panels that currently live outside the main window
    fn update_platform_windows(&mut self, platform: &mut dyn PlatformBackend) -> Result<(), ShellError>;

    /// Render and present every secondary platform window. Changes the
    /// current graphics context; callers restore it afterwards.
    fn render_platform_windows(
        &mut self,
        platform: &mut dyn PlatformBackend,
        graphics: &mut dyn GraphicsBackend,
    ) -> Result<(), ShellError>;

    /// Destroy the UI context
    fn shutdown(&mut self);
}
