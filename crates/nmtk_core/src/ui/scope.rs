//! Scoped containers
//!
//! Windows and menus pair their begin/end calls differently:
//! a window is always ended, whatever `begin_window` returned; a menu is
//! ended only if `begin_menu` returned true. The guards below encode both
//! rules in `Drop`, so the end call also runs when content fails.

use super::{UiLayer, Widgets};

/// Open window; ends it on drop
pub struct WindowScope<'a> {
    ui: &'a mut dyn UiLayer,
    open: bool,
}

impl<'a> WindowScope<'a> {
    /// Begin the window `name`
    pub fn begin(ui: &'a mut dyn UiLayer, name: &str) -> Self {
        let open = ui.begin_window(name);
        Self { ui, open }
    }

    /// Whether content should be produced (not collapsed or hidden)
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Content surface of the window
    pub fn widgets(&mut self) -> &mut dyn Widgets {
        self.ui.widgets()
    }
}

impl Drop for WindowScope<'_> {
    fn drop(&mut self) {
        self.ui.end_window();
    }
}

/// Open menu; only exists when `begin_menu` succeeded, ends it on drop
pub struct MenuScope<'a> {
    ui: &'a mut dyn UiLayer,
}

impl<'a> MenuScope<'a> {
    /// Begin the menu `name`; `None` when it did not open
    pub fn begin(ui: &'a mut dyn UiLayer, name: &str) -> Option<Self> {
        ui.begin_menu(name).then(|| Self { ui })
    }

    /// Content surface of the menu
    pub fn widgets(&mut self) -> &mut dyn Widgets {
        self.ui.widgets()
    }
}

impl Drop for MenuScope<'_> {
    fn drop(&mut self) {
        self.ui.end_menu();
    }
}
