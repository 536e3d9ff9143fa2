//! Recording fakes shared by the integration tests
//!
//! Every fake appends to one shared trace so tests can assert on the exact
//! call order across the platform, graphics and UI collaborators.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use nmtk_core::config::{FormFactor, ShellConfig, UiConfigFlags};
use nmtk_core::diagnostics::{DiagnosticSink, FeatureFault};
use nmtk_core::events::{PlatformEvent, WindowId};
use nmtk_core::foundation::math::Rect;
use nmtk_core::render::DrawList;
use nmtk_core::{GraphicsBackend, PlatformBackend, ShellError, UiLayer, Widgets};

pub type Trace = Rc<RefCell<Vec<String>>>;

pub const MAIN: WindowId = WindowId(1);

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

fn record(trace: &Trace, entry: impl Into<String>) {
    trace.borrow_mut().push(entry.into());
}

/// Desktop config without pacing, so tests never sleep
pub fn test_config(viewports: bool) -> ShellConfig {
    ShellConfig {
        form_factor: FormFactor::Desktop,
        viewports,
        frame_interval_ms: 0,
        ..ShellConfig::default()
    }
}

/// Sink whose faults stay readable after the context took ownership
#[derive(Clone, Default)]
pub struct SharedSink(pub Rc<RefCell<Vec<FeatureFault>>>);

impl DiagnosticSink for SharedSink {
    fn report(&mut self, fault: FeatureFault) {
        self.0.borrow_mut().push(fault);
    }
}

/// Knobs a test turns while the platform is owned by the orchestrator
#[derive(Clone)]
pub struct PlatformControls {
    pub events: Rc<RefCell<VecDeque<PlatformEvent>>>,
    pub drawable: Rc<Cell<(u32, u32)>>,
    pub current: Rc<Cell<Option<WindowId>>>,
    /// Secondary window creation and swaps fail while set
    pub fail_viewports: Rc<Cell<bool>>,
}

impl PlatformControls {
    pub fn push(&self, event: PlatformEvent) {
        self.events.borrow_mut().push_back(event);
    }
}

pub struct FakePlatform {
    trace: Trace,
    controls: PlatformControls,
    next_window: u32,
    pub software_keyboard: bool,
    pub dpi: Option<f32>,
}

impl FakePlatform {
    pub fn new(trace: &Trace) -> (Self, PlatformControls) {
        let controls = PlatformControls {
            events: Rc::new(RefCell::new(VecDeque::new())),
            drawable: Rc::new(Cell::new((800, 600))),
            current: Rc::new(Cell::new(None)),
            fail_viewports: Rc::new(Cell::new(false)),
        };
        let platform = Self {
            trace: Rc::clone(trace),
            controls: controls.clone(),
            next_window: 2,
            software_keyboard: false,
            dpi: None,
        };
        (platform, controls)
    }
}

impl PlatformBackend for FakePlatform {
    fn main_window(&self) -> WindowId {
        MAIN
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.controls.events.borrow_mut().pop_front()
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.controls.drawable.get()
    }

    fn display_dpi(&self) -> Option<f32> {
        self.dpi
    }

    fn has_software_keyboard(&self) -> bool {
        self.software_keyboard
    }

    fn start_text_input(&mut self) {
        record(&self.trace, "start_text_input");
    }

    fn stop_text_input(&mut self) {
        record(&self.trace, "stop_text_input");
    }

    fn current_context(&self) -> Option<WindowId> {
        self.controls.current.get()
    }

    fn make_current(&mut self, window: Option<WindowId>) -> Result<(), ShellError> {
        record(&self.trace, format!("make_current({window:?})"));
        self.controls.current.set(window);
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), ShellError> {
        record(&self.trace, "swap_buffers");
        Ok(())
    }

    fn create_viewport_window(&mut self, title: &str, _rect: Rect) -> Result<WindowId, ShellError> {
        record(&self.trace, format!("create_viewport_window({title})"));
        if self.controls.fail_viewports.get() {
            return Err(ShellError::Platform(format!("cannot create window for {title}")));
        }
        let window = WindowId(self.next_window);
        self.next_window += 1;
        Ok(window)
    }

    fn update_viewport_window(&mut self, window: WindowId, _rect: Rect) -> Result<(), ShellError> {
        record(&self.trace, format!("update_viewport_window({})", window.0));
        Ok(())
    }

    fn destroy_viewport_window(&mut self, window: WindowId) {
        record(&self.trace, format!("destroy_viewport_window({})", window.0));
    }

    fn swap_viewport(&mut self, window: WindowId) -> Result<(), ShellError> {
        record(&self.trace, format!("swap_viewport({})", window.0));
        if self.controls.fail_viewports.get() {
            return Err(ShellError::Platform(format!("swap failed for {}", window.0)));
        }
        Ok(())
    }

    fn release_viewports(&mut self) {
        record(&self.trace, "release_viewports");
    }

    fn shutdown(self: Box<Self>) {
        record(&self.trace, "platform.shutdown");
    }
}

pub struct FakeGraphics {
    trace: Trace,
}

impl FakeGraphics {
    pub fn new(trace: &Trace) -> Self {
        Self { trace: Rc::clone(trace) }
    }
}

impl GraphicsBackend for FakeGraphics {
    fn set_viewport(&mut self, width: u32, height: u32) {
        record(&self.trace, format!("set_viewport({width}x{height})"));
    }

    fn clear(&mut self) {
        record(&self.trace, "clear");
    }

    fn render_draw_list(&mut self, _draw_list: &DrawList) -> Result<(), ShellError> {
        record(&self.trace, "render_draw_list");
        Ok(())
    }

    fn shutdown(&mut self) {
        record(&self.trace, "graphics.shutdown");
    }
}

/// UI layer that only records calls
///
/// Windows are open and menus open unless listed in `collapsed` /
/// `closed_menus`.
pub struct RecordingUi {
    trace: Trace,
    flags: UiConfigFlags,
    draw_list: DrawList,
    pub collapsed: HashSet<String>,
    pub closed_menus: HashSet<String>,
}

impl RecordingUi {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            flags: UiConfigFlags::empty(),
            draw_list: DrawList::default(),
            collapsed: HashSet::new(),
            closed_menus: HashSet::new(),
        }
    }
}

impl Widgets for RecordingUi {
    fn text(&mut self, text: &str) {
        record(&self.trace, format!("text({text})"));
    }

    fn button(&mut self, label: &str) -> bool {
        record(&self.trace, format!("button({label})"));
        false
    }

    fn checkbox(&mut self, label: &str, _value: &mut bool) -> bool {
        record(&self.trace, format!("checkbox({label})"));
        false
    }

    fn input_text(&mut self, label: &str, _buffer: &mut String) -> bool {
        record(&self.trace, format!("input_text({label})"));
        false
    }

    fn separator(&mut self) {
        record(&self.trace, "separator");
    }

    fn menu_item(&mut self, label: &str) -> bool {
        record(&self.trace, format!("menu_item({label})"));
        false
    }
}

impl UiLayer for RecordingUi {
    fn configure(&mut self, flags: UiConfigFlags) {
        self.flags = flags;
    }

    fn config_flags(&self) -> UiConfigFlags {
        self.flags
    }

    fn set_font_scale(&mut self, scale: f32) {
        record(&self.trace, format!("set_font_scale({scale})"));
    }

    fn process_event(&mut self, _event: &PlatformEvent) {
        record(&self.trace, "process_event");
    }

    fn wants_text_input(&self) -> bool {
        false
    }

    fn set_display_size(&mut self, width: u32, height: u32) {
        record(&self.trace, format!("set_display_size({width}x{height})"));
    }

    fn new_frame(&mut self) {
        record(&self.trace, "new_frame");
    }

    fn dock_space_over_viewport(&mut self) {
        record(&self.trace, "dock_space");
    }

    fn begin_window(&mut self, name: &str) -> bool {
        record(&self.trace, format!("begin_window({name})"));
        !self.collapsed.contains(name)
    }

    fn end_window(&mut self) {
        record(&self.trace, "end_window");
    }

    fn begin_menu(&mut self, name: &str) -> bool {
        record(&self.trace, format!("begin_menu({name})"));
        !self.closed_menus.contains(name)
    }

    fn end_menu(&mut self) {
        record(&self.trace, "end_menu");
    }

    fn widgets(&mut self) -> &mut dyn Widgets {
        self
    }

    fn render(&mut self) {
        record(&self.trace, "render");
    }

    fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    fn update_platform_windows(&mut self, _platform: &mut dyn PlatformBackend) -> Result<(), ShellError> {
        record(&self.trace, "ui.update_platform_windows");
        Ok(())
    }

    fn render_platform_windows(
        &mut self,
        platform: &mut dyn PlatformBackend,
        _graphics: &mut dyn GraphicsBackend,
    ) -> Result<(), ShellError> {
        record(&self.trace, "ui.render_platform_windows");
        platform.make_current(Some(WindowId(2)))
    }

    fn shutdown(&mut self) {
        record(&self.trace, "ui.shutdown");
    }
}

/// Entries of `trace` recorded so far, then clear it
pub fn take(trace: &Trace) -> Vec<String> {
    std::mem::take(&mut *trace.borrow_mut())
}

/// Number of entries equal to `entry`
pub fn count(entries: &[String], entry: &str) -> usize {
    entries.iter().filter(|e| e.as_str() == entry).count()
}

/// Position of the first entry equal to `entry`
pub fn position(entries: &[String], entry: &str) -> Option<usize> {
    entries.iter().position(|e| e == entry)
}
