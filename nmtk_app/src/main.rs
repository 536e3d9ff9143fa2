//! NMTK desktop/handheld shell
//!
//! Opens the main window, registers the application's pages and menus and
//! runs the frame loop until the window is closed or File → Exit is chosen.

mod gl_renderer;
mod pages;
mod platform;
mod setup;

use nmtk_core::config::{Config, ShellConfig};
use nmtk_core::foundation::logging;
use nmtk_core::ui::{ImmediateUi, Style};
use nmtk_core::{FrameOrchestrator, ShellContext, ShellError};
use thiserror::Error;

use gl_renderer::{GlRenderer, RendererError};
use platform::GlfwPlatform;

/// Environment variable naming a configuration file
const CONFIG_ENV: &str = "NMTK_CONFIG";

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
}

fn main() {
    logging::init();
    log::info!("Starting NMTK...");

    if let Err(e) = run() {
        log::error!("NMTK terminated: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config();

    let mut context = ShellContext::new();
    setup::register(&mut context);
    log::info!(
        "Registered {} page(s), {} menu(s), {} input subscriber(s)",
        context.pages().len(),
        context.menus().len(),
        context.input().len()
    );

    let style = Style::default();
    let mut platform = GlfwPlatform::new(&config)?;
    let graphics = GlRenderer::new(&config, style.glyph_size, |symbol| platform.proc_address(symbol))?;
    let ui = ImmediateUi::with_style(style);

    let orchestrator = FrameOrchestrator::new(config, Box::new(platform), Box::new(graphics), Box::new(ui))?;
    orchestrator.run(&mut context)?;

    log::info!("NMTK exited cleanly");
    Ok(())
}

/// Configuration from the first argument or `NMTK_CONFIG`, else defaults
fn load_config() -> ShellConfig {
    let Some(path) = std::env::args().nth(1).or_else(|| std::env::var(CONFIG_ENV).ok()) else {
        log::info!("No configuration file given, using defaults");
        return ShellConfig::default();
    };

    match read_config(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from {path}");
            config
        }
        Err(e) => {
            log::warn!("Ignoring {path}: {e}; using defaults");
            ShellConfig::default()
        }
    }
}

fn read_config(path: &str) -> Result<ShellConfig, ShellError> {
    Ok(ShellConfig::load_from_file(path)?)
}
