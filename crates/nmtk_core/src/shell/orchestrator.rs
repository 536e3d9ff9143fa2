//! Frame orchestration
//!
//! One frame: poll platform events → forward them to the UI layer and input
//! subscribers → begin the UI frame → menus, pages, overlays → finalize →
//! synchronize secondary windows → clear, draw, swap → pace.

use crate::config::{FormFactor, ShellConfig, UiConfigFlags};
use crate::events::PlatformEvent;
use crate::foundation::time::{FramePacer, Timer};
use crate::overlay::StatsOverlay;
use crate::platform::PlatformBackend;
use crate::render::GraphicsBackend;
use crate::ui::UiLayer;
use crate::ShellError;

use super::ShellContext;

/// Lifecycle of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Collaborators are being set up
    Init,
    /// Frame loop active
    Running,
    /// Quit observed; resources are being released
    ShuttingDown,
    /// Everything released
    Terminated,
}

/// Owns the window, graphics and UI collaborators and drives the frame loop
pub struct FrameOrchestrator {
    config: ShellConfig,
    platform: Box<dyn PlatformBackend>,
    graphics: Box<dyn GraphicsBackend>,
    ui: Box<dyn UiLayer>,
    state: ShellState,
    quit_pending: bool,
    keyboard_shown: bool,
    surface_size: (u32, u32),
    timer: Timer,
    pacer: FramePacer,
    stats: Option<StatsOverlay>,
}

impl FrameOrchestrator {
    /// Configure the UI layer against the platform and enter `Running`
    ///
    /// The platform and graphics backends are already created; a failure
    /// to create them is reported by their own constructors.
    pub fn new(
        config: ShellConfig,
        mut platform: Box<dyn PlatformBackend>,
        mut graphics: Box<dyn GraphicsBackend>,
        mut ui: Box<dyn UiLayer>,
    ) -> Result<Self, ShellError> {
        log::info!("Initializing shell for {:?} form factor...", config.form_factor);

        let main = platform.main_window();
        platform
            .make_current(Some(main))
            .map_err(|e| ShellError::InitializationFailed(format!("main graphics context: {e}")))?;

        let flags = config.ui_flags();
        ui.configure(flags);
        if config.form_factor == FormFactor::Handheld {
            let dpi = platform.display_dpi();
            let scale = config.font_scale_for(dpi);
            log::info!("Display density {dpi:?} dpi, font scale {scale:.2}");
            ui.set_font_scale(scale);
        }

        let surface_size = platform.drawable_size();
        graphics.set_viewport(surface_size.0, surface_size.1);

        let mut orchestrator = Self {
            pacer: FramePacer::from_millis(config.frame_interval_ms),
            stats: config.show_stats_overlay.then(StatsOverlay::new),
            config,
            platform,
            graphics,
            ui,
            state: ShellState::Init,
            quit_pending: false,
            keyboard_shown: false,
            surface_size,
            timer: Timer::new(),
        };
        orchestrator.transition(ShellState::Running);
        log::debug!("UI flags {flags:?}, drawable {}x{}", surface_size.0, surface_size.1);
        Ok(orchestrator)
    }

    /// Current lifecycle state
    pub const fn state(&self) -> ShellState {
        self.state
    }

    /// Configuration the shell was created with
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Frame timer
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// UI layer driven by this shell
    pub fn ui(&self) -> &dyn UiLayer {
        self.ui.as_ref()
    }

    fn transition(&mut self, next: ShellState) {
        log::debug!("Shell state {:?} -> {next:?}", self.state);
        self.state = next;
    }

    /// Run one frame
    ///
    /// Returns the state after the frame. A quit observed during frame N
    /// moves the shell to [`ShellState::ShuttingDown`] at the top of frame
    /// N+1 without rendering it.
    pub fn step(&mut self, context: &mut ShellContext) -> Result<ShellState, ShellError> {
        if self.state != ShellState::Running {
            return Err(ShellError::InvalidState { expected: ShellState::Running, found: self.state });
        }
        if self.quit_pending || context.quit_requested() {
            self.transition(ShellState::ShuttingDown);
            return Ok(self.state);
        }

        self.pump_events(context);
        self.sync_text_input();

        let (width, height) = self.platform.drawable_size();
        if (width, height) != self.surface_size {
            log::debug!("Drawable resized to {width}x{height}");
            self.graphics.set_viewport(width, height);
            self.surface_size = (width, height);
        }
        self.ui.set_display_size(width, height);

        self.ui.new_frame();
        let flags = self.ui.config_flags();
        if flags.contains(UiConfigFlags::DOCKING) {
            self.ui.dock_space_over_viewport();
        }
        context.render_features(self.ui.as_mut());
        if let Some(stats) = self.stats.as_mut() {
            stats.update(&self.timer);
            stats.render_overlay(self.ui.as_mut(), context.sink_mut());
        }
        self.ui.render();

        if flags.contains(UiConfigFlags::VIEWPORTS) {
            self.present_viewports();
        }

        self.graphics.clear();
        if let Err(e) = self.graphics.render_draw_list(self.ui.draw_list()) {
            log::warn!("Main window draw failed this frame: {e}");
        }
        self.platform.swap_buffers()?;

        self.timer.tick();
        self.pacer.pace();
        Ok(self.state)
    }

    /// Drain pending platform events into the UI layer and the subscribers
    fn pump_events(&mut self, context: &mut ShellContext) {
        let main = self.platform.main_window();
        while let Some(event) = self.platform.poll_event() {
            if event.is_termination(main) && !self.quit_pending {
                log::info!("Quit requested by platform: {event:?}");
                self.quit_pending = true;
            }
            if let PlatformEvent::WindowResized { window, width, height } = event {
                if window == main && (width, height) != self.surface_size {
                    self.graphics.set_viewport(width, height);
                    self.surface_size = (width, height);
                }
            }
            self.ui.process_event(&event);
            context.dispatch_input(&event);
        }
    }

    fn sync_text_input(&mut self) {
        if !self.platform.has_software_keyboard() {
            return;
        }
        let wanted = self.ui.wants_text_input();
        if wanted == self.keyboard_shown {
            return;
        }
        if wanted {
            self.platform.start_text_input();
        } else {
            self.platform.stop_text_input();
        }
        self.keyboard_shown = wanted;
    }

    /// Update and draw secondary windows, then restore the graphics context
    /// that was current before
    ///
    /// Failures only cost the affected windows this frame.
    fn present_viewports(&mut self) {
        let previous = self.platform.current_context();
        if let Err(e) = self.ui.update_platform_windows(self.platform.as_mut()) {
            log::warn!("Secondary window update incomplete: {e}");
        }
        if let Err(e) = self.ui.render_platform_windows(self.platform.as_mut(), self.graphics.as_mut()) {
            log::warn!("Secondary window rendering incomplete: {e}");
        }
        if let Err(e) = self.platform.make_current(previous) {
            log::warn!("Could not restore graphics context {previous:?}: {e}");
        }
    }

    /// Run frames until shutdown, then release everything
    ///
    /// A frame error (the main window failing to present) is fatal:
    /// resources are still released before the error is returned.
    pub fn run(mut self, context: &mut ShellContext) -> Result<(), ShellError> {
        log::info!("Starting frame loop...");
        loop {
            match self.step(context) {
                Ok(ShellState::Running) => {}
                Ok(_) => break,
                Err(e) => {
                    log::error!("Frame loop failed: {e}");
                    self.shutdown();
                    return Err(e);
                }
            }
        }
        log::info!("Frame loop finished after {} frame(s)", self.timer.frame_count());
        self.shutdown();
        Ok(())
    }

    /// Release graphics resources, secondary windows, the UI context and the
    /// main window, in that order
    pub fn shutdown(mut self) -> ShellState {
        if self.state != ShellState::ShuttingDown {
            self.transition(ShellState::ShuttingDown);
        }
        log::info!("Shutting down shell...");

        let Self { mut platform, mut graphics, mut ui, .. } = self;
        graphics.shutdown();
        log::debug!("Graphics resources released");
        platform.release_viewports();
        log::debug!("Secondary windows released");
        ui.shutdown();
        platform.shutdown();

        log::info!("Shell shutdown complete");
        ShellState::Terminated
    }
}
