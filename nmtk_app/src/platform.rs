//! GLFW windowing backend
//!
//! The main window owns an OpenGL 3.3 core context (OpenGL ES 3.0 on
//! handheld targets). Secondary windows for detached panels are undecorated
//! and share the main context's objects.

use std::collections::{BTreeMap, VecDeque};
use std::ffi::c_void;

use glfw::{Action, Context, WindowEvent, WindowHint, WindowMode};
use nmtk_core::config::{FormFactor, ShellConfig};
use nmtk_core::events::{Key, MouseButton, PlatformEvent, WindowId};
use nmtk_core::foundation::math::Rect;
use nmtk_core::{PlatformBackend, ShellError};

const MAIN_WINDOW: WindowId = WindowId(1);

type Events = glfw::GlfwReceiver<(f64, WindowEvent)>;

struct SecondaryWindow {
    window: glfw::PWindow,
    events: Events,
}

/// GLFW implementation of [`PlatformBackend`]
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: Events,
    secondary: BTreeMap<WindowId, SecondaryWindow>,
    queue: VecDeque<PlatformEvent>,
    pumped: bool,
    current: Option<WindowId>,
    next_window: u32,
    dpi: Option<f32>,
}

impl GlfwPlatform {
    /// Initialize GLFW and open the main window with its context current
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: &ShellConfig) -> Result<Self, ShellError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| ShellError::InitializationFailed(format!("GLFW: {e:?}")))?;

        match config.form_factor {
            FormFactor::Desktop => {
                glfw.window_hint(WindowHint::ContextVersion(3, 3));
                glfw.window_hint(WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
                glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
                glfw.window_hint(WindowHint::Resizable(true));
            }
            FormFactor::Handheld => {
                glfw.window_hint(WindowHint::ClientApi(glfw::ClientApiHint::OpenGlEs));
                glfw.window_hint(WindowHint::ContextVersion(3, 0));
            }
        }

        let dpi = glfw.with_primary_monitor(|_, monitor| {
            let monitor = monitor?;
            let mode = monitor.get_video_mode()?;
            let (width_mm, _) = monitor.get_physical_size();
            (width_mm > 0).then(|| mode.width as f32 / (width_mm as f32 / 25.4))
        });

        let created = match config.form_factor {
            FormFactor::Desktop => glfw.create_window(
                config.window_width,
                config.window_height,
                &config.title,
                WindowMode::Windowed,
            ),
            FormFactor::Handheld => glfw.with_primary_monitor(|glfw, monitor| {
                let monitor = monitor?;
                let mode = monitor.get_video_mode()?;
                glfw.create_window(mode.width, mode.height, &config.title, WindowMode::FullScreen(monitor))
            }),
        };
        let (mut window, events) =
            created.ok_or_else(|| ShellError::InitializationFailed("window creation failed".to_string()))?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });
        window.set_all_polling(true);

        // Detached panels draw their own title bar
        glfw.window_hint(WindowHint::Decorated(false));

        let (width, height) = window.get_framebuffer_size();
        log::info!(
            "Created {:?} window '{}' ({width}x{height}), display {dpi:?} dpi",
            config.form_factor,
            config.title
        );

        Ok(Self {
            glfw,
            window,
            events,
            secondary: BTreeMap::new(),
            queue: VecDeque::new(),
            pumped: false,
            current: Some(MAIN_WINDOW),
            next_window: MAIN_WINDOW.0 + 1,
            dpi,
        })
    }

    /// OpenGL function address for the current context
    pub fn proc_address(&mut self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }

    /// Poll GLFW once and translate everything pending into the queue
    fn pump(&mut self) {
        self.glfw.poll_events();
        let scale = PixelScale::of(&self.window);
        for (_, event) in glfw::flush_messages(&self.events) {
            if let Some(event) = translate(MAIN_WINDOW, event, scale) {
                self.queue.push_back(event);
            }
        }
        for (id, secondary) in &self.secondary {
            let scale = PixelScale::of(&secondary.window);
            for (_, event) in glfw::flush_messages(&secondary.events) {
                if let Some(event) = translate(*id, event, scale) {
                    self.queue.push_back(event);
                }
            }
        }
    }

    fn secondary_mut(&mut self, window: WindowId) -> Result<&mut SecondaryWindow, ShellError> {
        self.secondary
            .get_mut(&window)
            .ok_or_else(|| ShellError::Platform(format!("unknown secondary window {}", window.0)))
    }

    /// Screen position of a UI rectangle given relative to the main client area
    fn screen_position(&self, rect: Rect) -> (i32, i32) {
        let (x, y) = PixelScale::of(&self.window).to_screen(rect.min.x, rect.min.y);
        let (origin_x, origin_y) = self.window.get_pos();
        (origin_x + x, origin_y + y)
    }

    /// Screen-coordinate size of a UI rectangle
    fn screen_size(&self, rect: Rect) -> (i32, i32) {
        let (width, height) = PixelScale::of(&self.window).to_screen(rect.width(), rect.height());
        (width.max(1), height.max(1))
    }
}

/// Drawable pixels per screen coordinate, per axis
///
/// UI space is the main window's drawable; GLFW positions windows and
/// reports the cursor in screen coordinates. The two differ on high-density
/// displays.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PixelScale {
    x: f64,
    y: f64,
}

impl PixelScale {
    fn of(window: &glfw::PWindow) -> Self {
        Self::between(window.get_size(), window.get_framebuffer_size())
    }

    /// Scale from a window size and its framebuffer size; 1.0 on a degenerate axis
    fn between(window: (i32, i32), framebuffer: (i32, i32)) -> Self {
        let axis = |points: i32, pixels: i32| {
            if points > 0 && pixels > 0 {
                f64::from(pixels) / f64::from(points)
            } else {
                1.0
            }
        };
        Self { x: axis(window.0, framebuffer.0), y: axis(window.1, framebuffer.1) }
    }

    fn to_pixels(self, x: f64, y: f64) -> (f64, f64) {
        (x * self.x, y * self.y)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn to_screen(self, x: f32, y: f32) -> (i32, i32) {
        ((f64::from(x) / self.x).round() as i32, (f64::from(y) / self.y).round() as i32)
    }
}

fn translate_key(key: glfw::Key, scancode: glfw::Scancode) -> Key {
    match key {
        glfw::Key::Backspace => Key::Backspace,
        glfw::Key::Enter | glfw::Key::KpEnter => Key::Enter,
        glfw::Key::Escape => Key::Escape,
        glfw::Key::Tab => Key::Tab,
        glfw::Key::Space => Key::Space,
        glfw::Key::Left => Key::Left,
        glfw::Key::Right => Key::Right,
        glfw::Key::Up => Key::Up,
        glfw::Key::Down => Key::Down,
        _ => Key::Other(scancode),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn translate_button(button: glfw::MouseButton) -> MouseButton {
    match button {
        glfw::MouseButton::Button1 => MouseButton::Left,
        glfw::MouseButton::Button2 => MouseButton::Right,
        glfw::MouseButton::Button3 => MouseButton::Middle,
        other => MouseButton::Other(other as u8),
    }
}

fn translate(window: WindowId, event: WindowEvent, scale: PixelScale) -> Option<PlatformEvent> {
    let event = match event {
        WindowEvent::Close => PlatformEvent::WindowClosed { window },
        WindowEvent::FramebufferSize(width, height) => PlatformEvent::WindowResized {
            window,
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        },
        WindowEvent::Focus(focused) => PlatformEvent::WindowFocused { window, focused },
        WindowEvent::Key(key, scancode, action, _) => PlatformEvent::KeyInput {
            window,
            key: translate_key(key, scancode),
            pressed: action != Action::Release,
        },
        WindowEvent::Char(ch) => PlatformEvent::TextInput { window, ch },
        WindowEvent::CursorPos(x, y) => {
            let (x, y) = scale.to_pixels(x, y);
            PlatformEvent::MouseMoved { window, x, y }
        }
        WindowEvent::MouseButton(button, action, _) => PlatformEvent::MouseButton {
            window,
            button: translate_button(button),
            pressed: action == Action::Press,
        },
        WindowEvent::Scroll(delta_x, delta_y) => PlatformEvent::MouseWheel { window, delta_x, delta_y },
        _ => return None,
    };
    Some(event)
}

impl PlatformBackend for GlfwPlatform {
    fn main_window(&self) -> WindowId {
        MAIN_WINDOW
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.queue.is_empty() && !self.pumped {
            self.pump();
            self.pumped = true;
        }
        let event = self.queue.pop_front();
        if event.is_none() {
            self.pumped = false;
        }
        event
    }

    fn drawable_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }

    fn display_dpi(&self) -> Option<f32> {
        self.dpi
    }

    fn current_context(&self) -> Option<WindowId> {
        self.current
    }

    fn make_current(&mut self, window: Option<WindowId>) -> Result<(), ShellError> {
        match window {
            None => glfw::make_context_current(None),
            Some(MAIN_WINDOW) => self.window.make_current(),
            Some(id) => self.secondary_mut(id)?.window.make_current(),
        }
        self.current = window;
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), ShellError> {
        self.window.swap_buffers();
        Ok(())
    }

    fn create_viewport_window(&mut self, title: &str, rect: Rect) -> Result<WindowId, ShellError> {
        let (width, height) = self.screen_size(rect);
        let (x, y) = self.screen_position(rect);
        let (mut window, events) = self
            .window
            .create_shared(width.unsigned_abs(), height.unsigned_abs(), title, WindowMode::Windowed)
            .ok_or_else(|| ShellError::Platform(format!("could not create window for '{title}'")))?;
        window.set_pos(x, y);
        window.set_all_polling(true);

        let id = WindowId(self.next_window);
        self.next_window += 1;
        self.secondary.insert(id, SecondaryWindow { window, events });
        log::debug!("Opened secondary window {} for '{title}' at ({x}, {y})", id.0);
        Ok(id)
    }

    fn update_viewport_window(&mut self, window: WindowId, rect: Rect) -> Result<(), ShellError> {
        let (x, y) = self.screen_position(rect);
        let (width, height) = self.screen_size(rect);
        let secondary = self.secondary_mut(window)?;
        secondary.window.set_pos(x, y);
        secondary.window.set_size(width, height);
        Ok(())
    }

    fn destroy_viewport_window(&mut self, window: WindowId) {
        if self.secondary.remove(&window).is_some() {
            log::debug!("Closed secondary window {}", window.0);
        }
        if self.current == Some(window) {
            self.current = None;
        }
    }

    fn swap_viewport(&mut self, window: WindowId) -> Result<(), ShellError> {
        self.secondary_mut(window)?.window.swap_buffers();
        Ok(())
    }

    fn release_viewports(&mut self) {
        if !self.secondary.is_empty() {
            log::debug!("Closing {} secondary window(s)", self.secondary.len());
        }
        self.secondary.clear();
        if self.current != Some(MAIN_WINDOW) {
            self.current = None;
        }
    }

    fn shutdown(self: Box<Self>) {
        let Self { glfw, window, events, secondary, .. } = *self;
        drop(secondary);
        drop(events);
        drop(window);
        log::info!("Main window destroyed");
        drop(glfw);
        log::info!("Windowing subsystem shut down");
    }
}
