//! Menu registry
//!
//! Menu groups render into the main menu bar in registration order. Unlike
//! page windows, a menu that did not open is not closed.

use crate::diagnostics::{isolate_into, DiagnosticSink, FeatureError, FeatureKind};
use crate::ui::{MenuScope, UiLayer, Widgets};

/// A renderable entry inside a menu group
pub trait MenuItem {
    /// Produce the entry into the open menu
    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError>;
}

impl<F> MenuItem for F
where
    F: FnMut(&mut dyn Widgets) -> Result<(), FeatureError>,
{
    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        self(ui)
    }
}

type Action = Box<dyn FnMut() -> Result<(), FeatureError>>;

/// Labelled entry running a callback when selected
pub struct MenuAction {
    label: String,
    action: Action,
}

impl MenuAction {
    /// Entry `label` running `action` when selected
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnMut() -> Result<(), FeatureError> + 'static,
    {
        Self { label: label.into(), action: Box::new(action) }
    }

    /// Entry label
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl MenuItem for MenuAction {
    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        if ui.menu_item(&self.label) {
            log::debug!("Menu action '{}' selected", self.label);
            (self.action)()?;
        }
        Ok(())
    }
}

/// Named collection of menu entries
pub struct MenuGroup {
    name: String,
    items: Vec<Box<dyn MenuItem>>,
}

impl MenuGroup {
    /// Empty group named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), items: Vec::new() }
    }

    /// Builder-style [`MenuGroup::push`]
    #[must_use]
    pub fn with_item<I: MenuItem + 'static>(mut self, item: I) -> Self {
        self.push(item);
        self
    }

    /// Append an entry
    pub fn push<I: MenuItem + 'static>(&mut self, item: I) {
        self.items.push(Box::new(item));
    }

    /// Menu name shown in the bar
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn render(&mut self, ui: &mut dyn UiLayer, sink: &mut dyn DiagnosticSink) {
        let Some(mut scope) = MenuScope::begin(ui, &self.name) else {
            return;
        };
        for (index, item) in self.items.iter_mut().enumerate() {
            let name = format!("{}/{index}", self.name);
            isolate_into(sink, FeatureKind::MenuItem, &name, || item.render(scope.widgets()));
        }
    }
}

/// Ordered, append-only list of menu groups
#[derive(Default)]
pub struct MenuRegistry {
    groups: Vec<MenuGroup>,
}

impl MenuRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group
    pub fn register(&mut self, group: MenuGroup) {
        log::debug!("Registered menu '{}' with {} item(s)", group.name, group.len());
        self.groups.push(group);
    }

    /// Render every group in registration order
    pub fn render_all(&mut self, ui: &mut dyn UiLayer, sink: &mut dyn DiagnosticSink) {
        for group in &mut self.groups {
            group.render(ui, sink);
        }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is registered
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
