use nmtk_core::diagnostics::FeatureError;
use nmtk_core::page::Page;
use nmtk_core::Widgets;

/// Maximum length of the display name field
const MAX_NAME_LEN: usize = 32;

/// Session preferences
#[derive(Debug)]
pub struct SettingsPage {
    show_hints: bool,
    display_name: String,
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self {
            show_hints: true,
            display_name: "nmtk".to_string(),
        }
    }
}

impl Page for SettingsPage {
    fn name(&self) -> &str {
        "Settings"
    }

    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        if ui.checkbox("Show hints", &mut self.show_hints) {
            log::info!("Hints {}", if self.show_hints { "enabled" } else { "disabled" });
        }
        if ui.input_text("Name", &mut self.display_name) && self.display_name.chars().count() > MAX_NAME_LEN {
            self.display_name = self.display_name.chars().take(MAX_NAME_LEN).collect();
        }
        if self.show_hints {
            ui.separator();
            ui.text("Drag a panel by its title bar; click the title to collapse it.");
        }
        Ok(())
    }
}
