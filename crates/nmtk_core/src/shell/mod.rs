//! Shell context and frame loop
//!
//! [`ShellContext`] owns every feature registry. It is built once, handed to
//! the application's setup call, then lent to the [`FrameOrchestrator`] for
//! the lifetime of the frame loop.

mod orchestrator;

pub use orchestrator::{FrameOrchestrator, ShellState};

use std::cell::Cell;
use std::rc::Rc;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::events::PlatformEvent;
use crate::input::InputDispatcher;
use crate::menu::{MenuGroup, MenuRegistry};
use crate::overlay::OverlayRegistry;
use crate::page::{Page, PageRegistry};
use crate::ui::UiLayer;

/// Shared flag features use to ask the shell to quit
///
/// The request is observed at the top of the next frame.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle(Rc<Cell<bool>>);

impl QuitHandle {
    /// Ask the shell to shut down
    pub fn request(&self) {
        self.0.set(true);
    }

    /// Whether a quit has been requested
    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Registries of pages, menus, overlays and input subscribers
pub struct ShellContext {
    pages: PageRegistry,
    menus: MenuRegistry,
    overlays: OverlayRegistry,
    input: InputDispatcher,
    quit: QuitHandle,
    sink: Box<dyn DiagnosticSink>,
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellContext {
    /// Empty context reporting feature failures to the log
    pub fn new() -> Self {
        Self::with_sink(LogSink)
    }

    /// Empty context reporting feature failures to `sink`
    pub fn with_sink<S: DiagnosticSink + 'static>(sink: S) -> Self {
        Self {
            pages: PageRegistry::new(),
            menus: MenuRegistry::new(),
            overlays: OverlayRegistry::new(),
            input: InputDispatcher::new(),
            quit: QuitHandle::default(),
            sink: Box::new(sink),
        }
    }

    /// Replace the diagnostic sink
    pub fn set_sink<S: DiagnosticSink + 'static>(&mut self, sink: S) {
        self.sink = Box::new(sink);
    }

    /// Register a page
    pub fn register_page<P: Page + 'static>(&mut self, page: P) {
        self.pages.register(page);
    }

    /// Register a menu group
    pub fn register_menu(&mut self, group: MenuGroup) {
        self.menus.register(group);
    }

    /// Register an overlay
    pub fn register_overlay<P: Page + 'static>(&mut self, overlay: P) {
        self.overlays.register(overlay);
    }

    /// Subscribe to raw platform events
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&PlatformEvent) + 'static,
    {
        self.input.subscribe(callback);
    }

    /// Handle features can keep to request shutdown
    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    /// Whether any feature requested shutdown
    pub fn quit_requested(&self) -> bool {
        self.quit.is_requested()
    }

    /// Registered pages
    pub const fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    /// Registered menu groups
    pub const fn menus(&self) -> &MenuRegistry {
        &self.menus
    }

    /// Registered overlays
    pub const fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    /// Registered input subscribers
    pub const fn input(&self) -> &InputDispatcher {
        &self.input
    }

    /// Sink receiving feature failures
    pub fn sink_mut(&mut self) -> &mut dyn DiagnosticSink {
        self.sink.as_mut()
    }

    /// Render menus, then pages, then overlays into the open UI frame
    ///
    /// Menus come first so the menu bar claims its space before page layout.
    pub fn render_features(&mut self, ui: &mut dyn UiLayer) {
        self.menus.render_all(ui, self.sink.as_mut());
        self.pages.render_all(ui, self.sink.as_mut());
        self.overlays.render_all(ui, self.sink.as_mut());
    }

    /// Forward one platform event to every input subscriber
    pub fn dispatch_input(&mut self, event: &PlatformEvent) {
        self.input.dispatch(event, self.sink.as_mut());
    }
}
