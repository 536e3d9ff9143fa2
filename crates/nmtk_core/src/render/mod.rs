//! Draw lists and the graphics backend seam
//!
//! The UI layer finalizes each frame into a [`DrawList`]; a
//! [`GraphicsBackend`] turns draw lists into pixels on the current surface.

use crate::foundation::math::{Color, Rect, Vec2};
use crate::ShellError;

/// A single backend-agnostic draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid color rectangle
    Rect {
        /// Rectangle in surface pixels
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Run of text starting at `position` (top-left of the first glyph)
    Text {
        /// Top-left of the first glyph
        position: Vec2,
        /// The text
        text: String,
        /// Text color
        color: Color,
        /// Font scale applied to the base glyph size
        scale: f32,
    },
}

impl DrawCommand {
    /// Same command moved by `offset`
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        match self {
            Self::Rect { rect, color } => Self::Rect { rect: rect.translated(offset), color },
            Self::Text { position, text, color, scale } => Self::Text {
                position: position + offset,
                text,
                color,
                scale,
            },
        }
    }
}

/// Finalized output of one UI frame for one surface
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Size of the surface the coordinates refer to
    pub display_size: Vec2,
    /// Commands in painter's order
    pub commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self { display_size: Vec2::zeros(), commands: Vec::new() }
    }
}

impl DrawList {
    /// Drop all commands, keeping the display size
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text runs, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }
}

/// Graphics API seam used by the frame orchestrator and the UI layer
pub trait GraphicsBackend {
    /// Resize the drawable viewport of the main surface
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the current framebuffer (color and depth)
    fn clear(&mut self);

    /// Submit a draw list to the current framebuffer
    fn render_draw_list(&mut self, draw_list: &DrawList) -> Result<(), ShellError>;

    /// Release all graphics resources; called once during shutdown
    fn shutdown(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;

    #[test]
    fn test_translate_moves_both_kinds() {
        let offset = Vec2::new(-100.0, 5.0);
        let rect = DrawCommand::Rect {
            rect: Rect::from_min_size(Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0)),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        };
        match rect.translated(offset) {
            DrawCommand::Rect { rect, .. } => assert_eq!(rect.min, Vec2::new(0.0, 5.0)),
            DrawCommand::Text { .. } => panic!("expected rect"),
        }

        let text = DrawCommand::Text {
            position: Vec2::new(100.0, 0.0),
            text: "Open".to_string(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            scale: 1.0,
        };
        match text.translated(offset) {
            DrawCommand::Text { position, text, .. } => {
                assert_eq!(position, Vec2::new(0.0, 5.0));
                assert_eq!(text, "Open");
            }
            DrawCommand::Rect { .. } => panic!("expected text"),
        }
    }

    #[test]
    fn test_texts_filters_rects() {
        let mut list = DrawList::default();
        list.push(DrawCommand::Rect {
            rect: Rect::from_min_size(Vec2::zeros(), Vec2::new(1.0, 1.0)),
            color: Vec4::zeros(),
        });
        list.push(DrawCommand::Text {
            position: Vec2::zeros(),
            text: "Home".to_string(),
            color: Vec4::zeros(),
            scale: 1.0,
        });
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Home"]);
        assert_eq!(list.len(), 2);
    }
}
