//! Secondary viewports
//!
//! A viewport is a UI window living outside the main window's client area,
//! shown in its own platform window with its own draw list.

use slotmap::new_key_type;

use crate::events::WindowId;
use crate::foundation::math::Rect;
use crate::render::DrawList;

new_key_type! {
    /// Handle to a secondary viewport
    pub struct ViewportKey;
}

/// A UI window hosted in its own platform window
#[derive(Debug)]
pub struct Viewport {
    /// Name of the UI window shown in this viewport
    pub window_name: String,
    /// Area covered, in main-window UI coordinates
    pub rect: Rect,
    /// Platform window, once created
    pub platform_window: Option<WindowId>,
    /// Commands for this viewport, relative to `rect.min`
    pub draw_list: DrawList,
    pub(crate) used: bool,
    pub(crate) moved: bool,
}

impl Viewport {
    pub(crate) fn new(window_name: &str, rect: Rect) -> Self {
        let mut draw_list = DrawList::default();
        draw_list.display_size = rect.size();
        Self {
            window_name: window_name.to_owned(),
            rect,
            platform_window: None,
            draw_list,
            used: true,
            moved: false,
        }
    }

    /// Follow the hosting UI window to `rect`
    pub(crate) fn track(&mut self, rect: Rect) {
        if self.rect != rect {
            self.rect = rect;
            self.moved = true;
        }
        self.draw_list.display_size = rect.size();
        self.used = true;
    }
}
