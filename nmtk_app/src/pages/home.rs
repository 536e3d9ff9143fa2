use nmtk_core::diagnostics::FeatureError;
use nmtk_core::page::Page;
use nmtk_core::Widgets;

/// Landing page with a click counter
#[derive(Debug, Default)]
pub struct HomePage {
    clicks: u32,
}

impl Page for HomePage {
    fn name(&self) -> &str {
        "Home"
    }

    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        ui.text("Welcome to NMTK");
        ui.separator();
        if ui.button("Click me") {
            self.clicks += 1;
            log::debug!("Home button clicked {} time(s)", self.clicks);
        }
        ui.text(&format!("Clicked {} time(s)", self.clicks));
        Ok(())
    }
}
