//! Pages shipped with the application

mod home;
mod settings;

pub use home::HomePage;
pub use settings::SettingsPage;
