//! Overlays rendered after pages
//!
//! Overlays are pages that draw on top of everything else: debugging aids,
//! statistics, notifications. They share the page isolation rules.

use crate::diagnostics::{DiagnosticSink, FeatureError, FeatureKind};
use crate::foundation::time::Timer;
use crate::page::{render_scoped, Page};
use crate::ui::{UiLayer, Widgets};

/// Ordered, append-only list of overlays
#[derive(Default)]
pub struct OverlayRegistry {
    overlays: Vec<Box<dyn Page>>,
}

impl OverlayRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overlay
    pub fn register<P: Page + 'static>(&mut self, overlay: P) {
        log::debug!("Registered overlay '{}'", overlay.name());
        self.overlays.push(Box::new(overlay));
    }

    /// Render every overlay in registration order
    pub fn render_all(&mut self, ui: &mut dyn UiLayer, sink: &mut dyn DiagnosticSink) {
        for overlay in &mut self.overlays {
            render_scoped(ui, sink, FeatureKind::Overlay, overlay.as_mut());
        }
    }

    /// Number of overlays
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether no overlay is registered
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

/// Built-in frame statistics window
#[derive(Debug, Default, Clone)]
pub struct StatsOverlay {
    frame_count: u64,
    fps: f64,
    average_fps: f64,
    frame_ms: f64,
}

impl StatsOverlay {
    /// Window title of the overlay
    pub const NAME: &'static str = "Frame Stats";

    /// Create an overlay with zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latest numbers from the frame timer
    pub fn update(&mut self, timer: &Timer) {
        self.frame_count = timer.frame_count();
        self.fps = timer.current_fps();
        self.average_fps = timer.average_fps();
        self.frame_ms = timer.smoothed_frame_ms();
    }

    /// Render into its own window, isolated like any other overlay
    pub fn render_overlay(&mut self, ui: &mut dyn UiLayer, sink: &mut dyn DiagnosticSink) {
        render_scoped(ui, sink, FeatureKind::Overlay, self);
    }
}

impl Page for StatsOverlay {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        ui.text(&format!("Frame: {}", self.frame_count));
        ui.text(&format!("FPS: {:.1} (avg {:.1})", self.fps, self.average_fps));
        ui.text(&format!("Frame time: {:.2} ms", self.frame_ms));
        Ok(())
    }
}
