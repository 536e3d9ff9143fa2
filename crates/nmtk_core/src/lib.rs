//! # NMTK Core
//!
//! Application shell that hosts an immediate-mode UI inside a native window and
//! lets independent features register themselves without the shell knowing
//! about them in advance.
//!
//! ## Features
//!
//! - **Pages**: named, independently scoped panels rendered once per frame
//! - **Menus**: named menu groups rendered into the main menu bar
//! - **Input subscribers**: callbacks receiving every raw platform event
//! - **Frame orchestration**: poll → build UI → finalize → present, with
//!   secondary platform windows for panels dragged outside the main window
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nmtk_core::prelude::*;
//!
//! struct Hello;
//!
//! impl Page for Hello {
//!     fn name(&self) -> &str {
//!         "Hello"
//!     }
//!
//!     fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
//!         ui.text("Hello from a page");
//!         Ok(())
//!     }
//! }
//!
//! fn setup(context: &mut ShellContext) {
//!     context.register_page(Hello);
//! }
//! ```
//!
//! The platform, graphics and UI collaborators are supplied as trait objects
//! ([`PlatformBackend`], [`GraphicsBackend`], [`UiLayer`]) and driven by
//! [`FrameOrchestrator`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod diagnostics;
pub mod input;
pub mod page;
pub mod menu;
pub mod overlay;
pub mod platform;
pub mod render;
pub mod ui;
pub mod shell;

mod error;

pub use error::ShellError;
pub use platform::PlatformBackend;
pub use render::GraphicsBackend;
pub use shell::{FrameOrchestrator, QuitHandle, ShellContext, ShellState};
pub use ui::{UiLayer, Widgets};

/// Common imports for shell users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, FormFactor, ShellConfig, UiConfigFlags},
        diagnostics::{DiagnosticSink, FeatureError, FeatureFault, FeatureKind, LogSink},
        events::{Key, MouseButton, PlatformEvent, WindowId},
        input::InputDispatcher,
        menu::{MenuAction, MenuGroup, MenuItem, MenuRegistry},
        overlay::OverlayRegistry,
        page::{FnPage, Page, PageRegistry},
        render::{DrawCommand, DrawList, GraphicsBackend},
        platform::PlatformBackend,
        shell::{FrameOrchestrator, QuitHandle, ShellContext, ShellState},
        ui::{ImmediateUi, UiLayer, Widgets},
        ShellError,
    };
}
