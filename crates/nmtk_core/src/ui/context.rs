//! Built-in immediate-mode UI layer
//!
//! Window state persists across frames, keyed by window name. Everything
//! else (layout, hit testing, draw commands) is rebuilt every frame between
//! `new_frame` and `render`.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::style::Style;
use super::viewport::{Viewport, ViewportKey};
use super::{UiLayer, Widgets};
use crate::config::UiConfigFlags;
use crate::events::{Key, MouseButton, PlatformEvent, WindowId};
use crate::foundation::math::{Color, Rect, Vec2};
use crate::platform::PlatformBackend;
use crate::render::{DrawCommand, DrawList, GraphicsBackend};
use crate::ShellError;

/// Where draw commands of the current container go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Main,
    Popup,
    Viewport(ViewportKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Window,
    Popup { background: usize },
}

/// Layout cursor of one open container
#[derive(Debug, Clone, Copy)]
struct LayoutFrame {
    kind: FrameKind,
    target: Target,
    origin: Vec2,
    cursor: Vec2,
    width: f32,
    extent: f32,
}

impl LayoutFrame {
    const fn new(kind: FrameKind, target: Target, origin: Vec2, width: f32) -> Self {
        Self { kind, target, origin, cursor: origin, width, extent: 0.0 }
    }
}

#[derive(Debug, Clone)]
struct WindowState {
    rect: Rect,
    collapsed: bool,
    user_placed: bool,
    viewport: Option<ViewportKey>,
}

#[derive(Debug, Clone)]
struct DragState {
    window: String,
    grab: Vec2,
    origin: Vec2,
    moved: bool,
}

#[derive(Debug, Clone, Copy)]
struct Pointer {
    pos: Vec2,
    press_origin: Vec2,
    down: bool,
    pressed: bool,
    released: bool,
}

impl Pointer {
    fn new() -> Self {
        Self {
            pos: Vec2::new(-f32::MAX, -f32::MAX),
            press_origin: Vec2::new(-f32::MAX, -f32::MAX),
            down: false,
            pressed: false,
            released: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextEdit {
    Insert(char),
    Backspace,
}

#[derive(Debug, Default)]
struct Keyboard {
    edits: Vec<TextEdit>,
    submitted: bool,
}

#[derive(Debug)]
struct MenuBar {
    drawn: bool,
    seen_last_frame: bool,
    cursor_x: f32,
    open: Option<String>,
    close_requested: bool,
    popup_rect: Option<Rect>,
    popup_width: f32,
}

/// Immediate-mode UI producing [`DrawList`]s
pub struct ImmediateUi {
    flags: UiConfigFlags,
    style: Style,
    font_scale: f32,
    display_size: Vec2,
    pointer: Pointer,
    keyboard: Keyboard,
    windows: HashMap<String, WindowState>,
    frames: Vec<LayoutFrame>,
    menu_bar: MenuBar,
    dock_space: bool,
    docked_count: usize,
    docked_last_frame: usize,
    drag: Option<DragState>,
    active_text: Option<String>,
    draw_list: DrawList,
    popup_commands: Vec<DrawCommand>,
    viewports: SlotMap<ViewportKey, Viewport>,
    in_frame: bool,
}

impl Default for ImmediateUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ImmediateUi {
    /// Create a UI context with the default style
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Create a UI context with a custom style
    pub fn with_style(style: Style) -> Self {
        let popup_width = style.padding.mul_add(-2.0, style.popup_min_width);
        Self {
            flags: UiConfigFlags::empty(),
            style,
            font_scale: 1.0,
            display_size: Vec2::zeros(),
            pointer: Pointer::new(),
            keyboard: Keyboard::default(),
            windows: HashMap::new(),
            frames: Vec::new(),
            menu_bar: MenuBar {
                drawn: false,
                seen_last_frame: false,
                cursor_x: 0.0,
                open: None,
                close_requested: false,
                popup_rect: None,
                popup_width,
            },
            dock_space: false,
            docked_count: 0,
            docked_last_frame: 0,
            drag: None,
            active_text: None,
            draw_list: DrawList::default(),
            popup_commands: Vec::new(),
            viewports: SlotMap::with_key(),
            in_frame: false,
        }
    }

    /// Active style
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Global font scale
    pub const fn font_scale(&self) -> f32 {
        self.font_scale
    }

    /// Current rectangle of a window seen in an earlier frame
    pub fn window_rect(&self, name: &str) -> Option<Rect> {
        self.windows.get(name).map(|state| state.rect)
    }

    /// Whether the named window is collapsed
    pub fn is_collapsed(&self, name: &str) -> bool {
        self.windows.get(name).is_some_and(|state| state.collapsed)
    }

    /// Name of the open menu, if any
    pub fn open_menu(&self) -> Option<&str> {
        self.menu_bar.open.as_deref()
    }

    /// Secondary viewports currently alive
    pub fn viewports(&self) -> impl Iterator<Item = &Viewport> {
        self.viewports.values()
    }

    fn display_rect(&self) -> Rect {
        Rect::from_min_size(Vec2::zeros(), self.display_size)
    }

    fn bar_height(&self) -> f32 {
        self.style.frame_height(self.font_scale)
    }

    fn bar_rect(&self) -> Rect {
        Rect::from_min_size(Vec2::zeros(), Vec2::new(self.display_size.x, self.bar_height()))
    }

    /// Viewport area below the menu bar, when one is shown this frame
    fn dock_area(&self) -> Rect {
        let top = if self.menu_bar.drawn { self.bar_height() } else { 0.0 };
        Rect::new(Vec2::new(0.0, top), self.display_size)
    }

    fn root_frame(&self) -> LayoutFrame {
        let pad = self.style.padding;
        let top = if self.menu_bar.seen_last_frame { self.bar_height() } else { 0.0 };
        let origin = Vec2::new(pad, top + pad);
        LayoutFrame::new(FrameKind::Root, Target::Main, origin, pad.mul_add(-2.0, self.display_size.x).max(0.0))
    }

    fn frame(&self) -> LayoutFrame {
        self.frames.last().copied().unwrap_or_else(|| self.root_frame())
    }

    fn advance(&mut self, size: Vec2) {
        let spacing = self.style.item_spacing;
        if let Some(frame) = self.frames.last_mut() {
            frame.extent = frame.extent.max(size.x);
            frame.cursor.y += size.y + spacing;
        }
    }

    fn push(&mut self, target: Target, command: DrawCommand) {
        match target {
            Target::Main => self.draw_list.push(command),
            Target::Popup => self.popup_commands.push(command),
            Target::Viewport(key) => {
                if let Some(viewport) = self.viewports.get_mut(key) {
                    let offset = -viewport.rect.min;
                    viewport.draw_list.push(command.translated(offset));
                }
            }
        }
    }

    fn push_rect(&mut self, target: Target, rect: Rect, color: Color) {
        self.push(target, DrawCommand::Rect { rect, color });
    }

    fn push_text(&mut self, target: Target, position: Vec2, text: &str) {
        let command = DrawCommand::Text {
            position,
            text: text.to_owned(),
            color: self.style.text,
            scale: self.font_scale,
        };
        self.push(target, command);
    }

    fn pointer_over_menu(&self) -> bool {
        let pos = self.pointer.pos;
        (self.menu_bar.drawn && self.bar_rect().contains(pos))
            || self.menu_bar.popup_rect.is_some_and(|rect| rect.contains(pos))
    }

    fn hovered(&self, rect: Rect, target: Target) -> bool {
        let blocked = target != Target::Popup && self.pointer_over_menu();
        !blocked && rect.contains(self.pointer.pos)
    }

    fn clicked(&self, rect: Rect, target: Target) -> bool {
        self.pointer.released && rect.contains(self.pointer.press_origin) && self.hovered(rect, target)
    }

    fn initial_window_state(&self) -> WindowState {
        let pad = self.style.padding;
        #[allow(clippy::cast_precision_loss)]
        let step = 30.0 * self.windows.len() as f32;
        let top = if self.menu_bar.drawn { self.bar_height() } else { 0.0 };
        let min = Vec2::new(pad.mul_add(3.0, step), top + pad.mul_add(3.0, step));
        WindowState {
            rect: Rect::from_min_size(min, self.style.default_window_size),
            collapsed: false,
            user_placed: false,
            viewport: None,
        }
    }

    /// Title bar press/drag/release handling for the window being begun
    fn interact_title_bar(&mut self, name: &str, state: &mut WindowState) {
        let title = Rect::from_min_size(state.rect.min, Vec2::new(state.rect.width(), self.bar_height()));
        let threshold = self.style.drag_threshold;

        if self.pointer.pressed
            && self.drag.is_none()
            && !self.pointer_over_menu()
            && title.contains(self.pointer.press_origin)
        {
            self.drag = Some(DragState {
                window: name.to_owned(),
                grab: self.pointer.press_origin - state.rect.min,
                origin: self.pointer.press_origin,
                moved: false,
            });
        }

        let Some(drag) = self.drag.as_mut().filter(|drag| drag.window == name) else {
            return;
        };
        if !drag.moved && (self.pointer.pos - drag.origin).norm() > threshold {
            drag.moved = true;
        }
        let moved = drag.moved;
        if moved {
            state.rect = Rect::from_min_size(self.pointer.pos - drag.grab, state.rect.size());
            state.user_placed = true;
        }
        if !self.pointer.down {
            if !moved && self.pointer.released {
                state.collapsed = !state.collapsed;
            }
            self.drag = None;
        }
    }

    /// Route the window to the main viewport or its own secondary viewport
    fn assign_viewport(&mut self, name: &str, state: &mut WindowState) -> Target {
        let display = self.display_rect();
        let has_display = display.width() > 0.0 && display.height() > 0.0;
        if !self.flags.contains(UiConfigFlags::VIEWPORTS) || !has_display || state.rect.intersects(&display) {
            state.viewport = None;
            return Target::Main;
        }

        let key = match state.viewport.filter(|key| self.viewports.contains_key(*key)) {
            Some(key) => key,
            None => {
                log::debug!("Window '{name}' left the main viewport");
                self.viewports.insert(Viewport::new(name, state.rect))
            }
        };
        self.viewports[key].track(state.rect);
        state.viewport = Some(key);
        Target::Viewport(key)
    }

    fn draw_window_frame(&mut self, name: &str, state: &WindowState, target: Target) -> Rect {
        let pad = self.style.padding;
        let title = Rect::from_min_size(state.rect.min, Vec2::new(state.rect.width(), self.bar_height()));
        let dragging = self.drag.as_ref().is_some_and(|drag| drag.window == name);
        let title_color = if dragging { self.style.title_bg_active } else { self.style.title_bg };

        self.push_rect(target, title, title_color);
        self.push_text(target, title.min + Vec2::new(pad, pad * 0.5), name);

        let body = Rect::new(Vec2::new(state.rect.min.x, title.max.y), state.rect.max);
        if !state.collapsed {
            self.push_rect(target, body, self.style.window_bg);
        }
        body
    }

    fn viewport_of(&self, window: WindowId) -> Option<ViewportKey> {
        self.viewports
            .iter()
            .find(|(_, viewport)| viewport.platform_window == Some(window))
            .map(|(key, _)| key)
    }

    /// A secondary window was closed by the user: bring its panel home
    fn redock(&mut self, window: WindowId) {
        let Some(key) = self.viewport_of(window) else {
            return;
        };
        let name = self.viewports[key].window_name.clone();
        if self.drag.as_ref().is_some_and(|drag| drag.window == name) {
            self.drag = None;
        }
        let pad = self.style.padding;
        let home = Vec2::new(pad * 3.0, self.bar_height() + pad * 3.0);
        if let Some(state) = self.windows.get_mut(&name) {
            state.rect = Rect::from_min_size(home, state.rect.size());
            state.user_placed = false;
            state.viewport = None;
        }
        log::info!("Secondary window for '{name}' closed; returning it to the main window");
    }
}

impl Widgets for ImmediateUi {
    fn text(&mut self, text: &str) {
        let frame = self.frame();
        let size = self.style.text_size(text, self.font_scale);
        self.push_text(frame.target, frame.cursor, text);
        self.advance(size);
    }

    fn button(&mut self, label: &str) -> bool {
        let frame = self.frame();
        let pad = self.style.padding;
        let text = self.style.text_size(label, self.font_scale);
        let rect = Rect::from_min_size(
            frame.cursor,
            Vec2::new(pad.mul_add(2.0, text.x), self.style.frame_height(self.font_scale)),
        );

        let color = if self.hovered(rect, frame.target) { self.style.highlight } else { self.style.frame_bg };
        let clicked = self.clicked(rect, frame.target);
        self.push_rect(frame.target, rect, color);
        self.push_text(frame.target, rect.min + Vec2::new(pad, pad * 0.5), label);
        self.advance(rect.size());
        clicked
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let frame = self.frame();
        let pad = self.style.padding;
        let side = self.style.frame_height(self.font_scale);
        let text = self.style.text_size(label, self.font_scale);
        let check = Rect::from_min_size(frame.cursor, Vec2::new(side, side));
        let rect = Rect::from_min_size(frame.cursor, Vec2::new(side + pad + text.x, side));

        let clicked = self.clicked(rect, frame.target);
        if clicked {
            *value = !*value;
        }

        self.push_rect(frame.target, check, self.style.frame_bg);
        if *value {
            let inset = Vec2::new(pad * 0.5, pad * 0.5);
            let mark = Rect::new(check.min + inset, check.max - inset);
            self.push_rect(frame.target, mark, self.style.highlight);
        }
        self.push_text(frame.target, Vec2::new(check.max.x + pad, check.min.y + pad * 0.5), label);
        self.advance(rect.size());
        clicked
    }

    fn input_text(&mut self, label: &str, buffer: &mut String) -> bool {
        let frame = self.frame();
        let pad = self.style.padding;
        let height = self.style.frame_height(self.font_scale);
        let label_size = self.style.text_size(label, self.font_scale);
        let min_width = self.style.glyph_size.x * self.font_scale * 8.0;
        let field_width = (frame.width - label_size.x - pad).max(min_width);
        let field = Rect::from_min_size(frame.cursor, Vec2::new(field_width, height));

        if self.pointer.pressed {
            let pressed_here = field.contains(self.pointer.press_origin)
                && !(frame.target != Target::Popup && self.pointer_over_menu());
            if pressed_here {
                self.active_text = Some(label.to_owned());
            } else if self.active_text.as_deref() == Some(label) {
                self.active_text = None;
            }
        }

        let active = self.active_text.as_deref() == Some(label);
        let mut changed = false;
        if active {
            for edit in &self.keyboard.edits {
                match *edit {
                    TextEdit::Insert(ch) => {
                        buffer.push(ch);
                        changed = true;
                    }
                    TextEdit::Backspace => changed |= buffer.pop().is_some(),
                }
            }
            if self.keyboard.submitted {
                self.active_text = None;
            }
        }

        let background = if active { self.style.highlight } else { self.style.frame_bg };
        self.push_rect(frame.target, field, background);
        let shown = if active { format!("{buffer}_") } else { buffer.clone() };
        self.push_text(frame.target, field.min + Vec2::new(pad, pad * 0.5), &shown);
        self.push_text(frame.target, Vec2::new(field.max.x + pad, field.min.y + pad * 0.5), label);
        self.advance(Vec2::new(field_width + pad + label_size.x, height));
        changed
    }

    fn separator(&mut self) {
        let frame = self.frame();
        let spacing = self.style.item_spacing;
        let line = Rect::from_min_size(
            Vec2::new(frame.origin.x, frame.cursor.y + spacing * 0.5),
            Vec2::new(frame.width, 1.0),
        );
        self.push_rect(frame.target, line, self.style.separator);
        self.advance(Vec2::new(0.0, spacing));
    }

    fn menu_item(&mut self, label: &str) -> bool {
        let frame = self.frame();
        let pad = self.style.padding;
        let text = self.style.text_size(label, self.font_scale);
        let rect = Rect::from_min_size(
            frame.cursor,
            Vec2::new(frame.width.max(pad.mul_add(2.0, text.x)), self.style.frame_height(self.font_scale)),
        );

        if self.hovered(rect, frame.target) {
            self.push_rect(frame.target, rect, self.style.highlight);
        }
        let clicked = self.clicked(rect, frame.target);
        if clicked && matches!(frame.kind, FrameKind::Popup { .. }) {
            self.menu_bar.close_requested = true;
        }
        self.push_text(frame.target, rect.min + Vec2::new(pad, pad * 0.5), label);
        self.advance(rect.size());
        clicked
    }
}

impl UiLayer for ImmediateUi {
    fn configure(&mut self, flags: UiConfigFlags) {
        log::debug!("UI configured with {flags:?}");
        self.flags = flags;
    }

    fn config_flags(&self) -> UiConfigFlags {
        self.flags
    }

    fn set_font_scale(&mut self, scale: f32) {
        self.font_scale = scale;
    }

    fn process_event(&mut self, event: &PlatformEvent) {
        match *event {
            PlatformEvent::MouseMoved { window, x, y } => {
                #[allow(clippy::cast_possible_truncation)]
                let local = Vec2::new(x as f32, y as f32);
                let origin = self
                    .viewport_of(window)
                    .map_or_else(Vec2::zeros, |key| self.viewports[key].rect.min);
                self.pointer.pos = local + origin;
            }
            PlatformEvent::MouseButton { button: MouseButton::Left, pressed, .. } => {
                if pressed {
                    self.pointer.pressed = true;
                    self.pointer.press_origin = self.pointer.pos;
                } else {
                    self.pointer.released = true;
                }
                self.pointer.down = pressed;
            }
            PlatformEvent::TextInput { ch, .. } if !ch.is_control() => {
                self.keyboard.edits.push(TextEdit::Insert(ch));
            }
            PlatformEvent::KeyInput { key: Key::Backspace, pressed: true, .. } => {
                self.keyboard.edits.push(TextEdit::Backspace);
            }
            PlatformEvent::KeyInput { key: Key::Enter, pressed: true, .. } => {
                self.keyboard.submitted = true;
            }
            PlatformEvent::KeyInput { key: Key::Escape, pressed: true, .. } => {
                self.menu_bar.open = None;
                self.active_text = None;
            }
            PlatformEvent::WindowClosed { window } => self.redock(window),
            _ => {}
        }
    }

    fn wants_text_input(&self) -> bool {
        self.active_text.is_some()
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_size = Vec2::new(width as f32, height as f32);
    }

    fn new_frame(&mut self) {
        if self.in_frame {
            log::warn!("new_frame called again before render");
        }
        self.in_frame = true;

        self.draw_list.clear();
        self.draw_list.display_size = self.display_size;
        self.popup_commands.clear();
        for viewport in self.viewports.values_mut() {
            viewport.draw_list.clear();
            viewport.used = false;
        }

        self.menu_bar.drawn = false;
        self.menu_bar.cursor_x = 0.0;
        self.menu_bar.close_requested = false;
        self.menu_bar.popup_rect = None;
        self.dock_space = false;
        self.docked_count = 0;

        self.frames.clear();
        let root = self.root_frame();
        self.frames.push(root);
    }

    fn dock_space_over_viewport(&mut self) {
        self.dock_space = true;
    }

    fn begin_window(&mut self, name: &str) -> bool {
        let mut state = match self.windows.remove(name) {
            Some(state) => state,
            None => self.initial_window_state(),
        };

        if self.dock_space && self.flags.contains(UiConfigFlags::DOCKING) && !state.user_placed {
            let columns = self.docked_last_frame.max(self.docked_count + 1);
            state.rect = self.dock_area().column(self.docked_count, columns);
            self.docked_count += 1;
        }

        self.interact_title_bar(name, &mut state);
        let target = self.assign_viewport(name, &mut state);
        let body = self.draw_window_frame(name, &state, target);

        let pad = self.style.padding;
        let origin = body.min + Vec2::new(pad, pad);
        let width = pad.mul_add(-2.0, body.width()).max(0.0);
        self.frames.push(LayoutFrame::new(FrameKind::Window, target, origin, width));

        let open = !state.collapsed;
        self.windows.insert(name.to_owned(), state);
        open
    }

    fn end_window(&mut self) {
        if self.frames.last().map(|frame| frame.kind) == Some(FrameKind::Window) {
            self.frames.pop();
        } else {
            log::warn!("end_window without a matching begin_window");
        }
    }

    fn begin_menu(&mut self, name: &str) -> bool {
        let pad = self.style.padding;
        let bar_height = self.bar_height();
        if !self.menu_bar.drawn {
            self.menu_bar.drawn = true;
            self.menu_bar.cursor_x = 0.0;
            self.push_rect(Target::Main, self.bar_rect(), self.style.menu_bg);
        }

        let label = self.style.text_size(name, self.font_scale);
        let header = Rect::from_min_size(
            Vec2::new(self.menu_bar.cursor_x, 0.0),
            Vec2::new(pad.mul_add(2.0, label.x), bar_height),
        );
        self.menu_bar.cursor_x = header.max.x;

        if self.pointer.pressed && header.contains(self.pointer.press_origin) {
            let was_open = self.menu_bar.open.as_deref() == Some(name);
            self.menu_bar.open = if was_open { None } else { Some(name.to_owned()) };
        }

        let open = self.menu_bar.open.as_deref() == Some(name);
        if open || header.contains(self.pointer.pos) {
            self.push_rect(Target::Main, header, self.style.highlight);
        }
        self.push_text(Target::Main, header.min + Vec2::new(pad, pad * 0.5), name);

        if !open {
            return false;
        }

        // Background size is only known once the items are laid out; patched in end_menu.
        let corner = Vec2::new(header.min.x, header.max.y);
        let background = self.popup_commands.len();
        self.push_rect(Target::Popup, Rect::new(corner, corner), self.style.menu_bg);
        self.frames.push(LayoutFrame::new(
            FrameKind::Popup { background },
            Target::Popup,
            corner + Vec2::new(pad, pad),
            self.menu_bar.popup_width,
        ));
        true
    }

    fn end_menu(&mut self) {
        let Some(frame) = self.frames.last().copied() else {
            log::warn!("end_menu without a matching begin_menu");
            return;
        };
        let FrameKind::Popup { background } = frame.kind else {
            log::warn!("end_menu without a matching begin_menu");
            return;
        };
        self.frames.pop();

        let pad = self.style.padding;
        let min_content = pad.mul_add(-2.0, self.style.popup_min_width);
        let content_width = frame.extent.max(min_content);
        let corner = frame.origin - Vec2::new(pad, pad);
        let bottom = (frame.cursor.y - self.style.item_spacing).max(frame.origin.y) + pad;
        let rect = Rect::new(corner, Vec2::new(corner.x + pad.mul_add(2.0, content_width), bottom));

        self.menu_bar.popup_width = content_width;
        self.menu_bar.popup_rect = Some(rect);
        if let Some(command) = self.popup_commands.get_mut(background) {
            *command = DrawCommand::Rect { rect, color: self.style.menu_bg };
        }
    }

    fn widgets(&mut self) -> &mut dyn Widgets {
        self
    }

    fn render(&mut self) {
        if self.frames.len() > 1 {
            log::warn!("{} UI container(s) still open at end of frame", self.frames.len() - 1);
        }
        self.frames.clear();

        let pressed_elsewhere = self.pointer.pressed && !self.pointer_over_menu();
        if self.menu_bar.close_requested || pressed_elsewhere {
            self.menu_bar.open = None;
        }
        if !self.pointer.down {
            self.drag = None;
        }

        self.docked_last_frame = self.docked_count;
        self.menu_bar.seen_last_frame = self.menu_bar.drawn;
        self.draw_list.commands.append(&mut self.popup_commands);

        self.pointer.pressed = false;
        self.pointer.released = false;
        self.keyboard.edits.clear();
        self.keyboard.submitted = false;
        self.in_frame = false;
    }

    fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    fn update_platform_windows(&mut self, platform: &mut dyn PlatformBackend) -> Result<(), ShellError> {
        let stale: Vec<ViewportKey> = self
            .viewports
            .iter()
            .filter(|(_, viewport)| !viewport.used)
            .map(|(key, _)| key)
            .collect();
        for key in stale {
            if let Some(viewport) = self.viewports.remove(key) {
                if let Some(window) = viewport.platform_window {
                    log::debug!("Destroying secondary window for '{}'", viewport.window_name);
                    platform.destroy_viewport_window(window);
                }
            }
        }

        let mut first_error = None;
        for viewport in self.viewports.values_mut() {
            let synced = match viewport.platform_window {
                None => platform.create_viewport_window(&viewport.window_name, viewport.rect).map(|window| {
                    log::debug!("Created secondary window {window:?} for '{}'", viewport.window_name);
                    viewport.platform_window = Some(window);
                }),
                Some(window) if viewport.moved => platform.update_viewport_window(window, viewport.rect),
                Some(_) => Ok(()),
            };
            match synced {
                Ok(()) => viewport.moved = false,
                Err(e) => {
                    log::warn!("Skipping secondary window for '{}': {e}", viewport.window_name);
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn render_platform_windows(
        &mut self,
        platform: &mut dyn PlatformBackend,
        graphics: &mut dyn GraphicsBackend,
    ) -> Result<(), ShellError> {
        let mut first_error = None;
        for viewport in self.viewports.values() {
            let Some(window) = viewport.platform_window else {
                continue;
            };
            let presented = platform.make_current(Some(window)).and_then(|()| {
                graphics.clear();
                graphics.render_draw_list(&viewport.draw_list)?;
                platform.swap_viewport(window)
            });
            if let Err(e) = presented {
                log::warn!("Secondary window {window:?} ('{}') not presented: {e}", viewport.window_name);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn shutdown(&mut self) {
        self.windows.clear();
        self.viewports.clear();
        self.frames.clear();
        self.draw_list.clear();
        log::debug!("UI context destroyed");
    }
}
