//! Application setup: the one place features register with the shell

use nmtk_core::menu::{MenuAction, MenuGroup};
use nmtk_core::ShellContext;

use crate::pages::{HomePage, SettingsPage};

/// Register every page, menu and input subscriber of the application
pub fn register(context: &mut ShellContext) {
    context.register_page(HomePage::default());
    context.register_page(SettingsPage::default());

    let quit = context.quit_handle();
    context.register_menu(
        MenuGroup::new("File")
            .with_item(MenuAction::new("Open", || {
                log::info!("File > Open selected");
                Ok(())
            }))
            .with_item(MenuAction::new("Exit", move || {
                quit.request();
                Ok(())
            })),
    );

    context.subscribe(|event| log::trace!("input: {event:?}"));
}
