//! Metrics and colors of the built-in UI layer

use crate::foundation::math::{Color, Vec2, Vec4};

/// Visual style of [`super::ImmediateUi`]
///
/// Sizes are in unscaled pixels; the UI multiplies text metrics by the
/// global font scale.
#[derive(Debug, Clone)]
pub struct Style {
    /// Size of one glyph cell at scale 1.0
    pub glyph_size: Vec2,
    /// Inner padding of windows, popups and buttons
    pub padding: f32,
    /// Vertical gap between widgets
    pub item_spacing: f32,
    /// Size of a window nobody placed yet and docking is off
    pub default_window_size: Vec2,
    /// Minimum width of a menu popup
    pub popup_min_width: f32,
    /// Cursor travel before a title bar press becomes a drag
    pub drag_threshold: f32,
    /// Window body background
    pub window_bg: Color,
    /// Title bar background
    pub title_bg: Color,
    /// Title bar background while being dragged
    pub title_bg_active: Color,
    /// Menu bar and popup background
    pub menu_bg: Color,
    /// Highlight of an open menu header or hovered item
    pub highlight: Color,
    /// Button and input field background
    pub frame_bg: Color,
    /// Separator line
    pub separator: Color,
    /// Text
    pub text: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            glyph_size: Vec2::new(7.0, 13.0),
            padding: 6.0,
            item_spacing: 4.0,
            default_window_size: Vec2::new(320.0, 240.0),
            popup_min_width: 140.0,
            drag_threshold: 3.0,
            window_bg: Vec4::new(0.06, 0.06, 0.06, 0.94),
            title_bg: Vec4::new(0.04, 0.04, 0.04, 1.0),
            title_bg_active: Vec4::new(0.16, 0.29, 0.48, 1.0),
            menu_bg: Vec4::new(0.14, 0.14, 0.14, 1.0),
            highlight: Vec4::new(0.26, 0.59, 0.98, 0.8),
            frame_bg: Vec4::new(0.16, 0.29, 0.48, 0.54),
            separator: Vec4::new(0.43, 0.43, 0.50, 0.5),
            text: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Style {
    /// Size of `text` rendered at `scale`
    #[allow(clippy::cast_precision_loss)]
    pub fn text_size(&self, text: &str, scale: f32) -> Vec2 {
        let chars = text.chars().count() as f32;
        Vec2::new(chars * self.glyph_size.x * scale, self.glyph_size.y * scale)
    }

    /// Height of a single-line framed widget (title bar, menu bar, button)
    pub fn frame_height(&self, scale: f32) -> f32 {
        self.glyph_size.y.mul_add(scale, self.padding)
    }
}
