//! Page registry
//!
//! A page is an independently scoped, named panel rendered once per frame.
//! Each page gets its own window container; the container is always ended,
//! and a failing page never affects the pages after it.

use crate::diagnostics::{isolate_into, DiagnosticSink, FeatureError, FeatureKind};
use crate::ui::{UiLayer, WindowScope, Widgets};

/// A named UI panel
pub trait Page {
    /// Display name; also the key of the page's window container
    fn name(&self) -> &str;

    /// Produce the page content into its open container
    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError>;
}

/// Page built from a name and a closure
pub struct FnPage<F> {
    name: String,
    content: F,
}

impl<F> FnPage<F>
where
    F: FnMut(&mut dyn Widgets) -> Result<(), FeatureError>,
{
    /// Create a page named `name` rendering with `content`
    pub fn new(name: impl Into<String>, content: F) -> Self {
        Self { name: name.into(), content }
    }
}

impl<F> Page for FnPage<F>
where
    F: FnMut(&mut dyn Widgets) -> Result<(), FeatureError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&mut self, ui: &mut dyn Widgets) -> Result<(), FeatureError> {
        (self.content)(ui)
    }
}

/// Render one page inside its own window container
///
/// The container is ended on every path, including a failing or panicking
/// page; the failure goes to `sink`.
pub(crate) fn render_scoped(
    ui: &mut dyn UiLayer,
    sink: &mut dyn DiagnosticSink,
    kind: FeatureKind,
    page: &mut dyn Page,
) {
    let name = page.name().to_owned();
    let mut scope = WindowScope::begin(ui, &name);
    if !scope.is_open() {
        return;
    }
    isolate_into(sink, kind, &name, || page.render(scope.widgets()));
}

/// Ordered, append-only list of pages
#[derive(Default)]
pub struct PageRegistry {
    pages: Vec<Box<dyn Page>>,
}

impl PageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page
    pub fn register<P: Page + 'static>(&mut self, page: P) {
        self.register_boxed(Box::new(page));
    }

    /// Append an already boxed page
    pub fn register_boxed(&mut self, page: Box<dyn Page>) {
        log::debug!("Registered page '{}'", page.name());
        self.pages.push(page);
    }

    /// Render every page in registration order
    pub fn render_all(&mut self, ui: &mut dyn UiLayer, sink: &mut dyn DiagnosticSink) {
        for page in &mut self.pages {
            render_scoped(ui, sink, FeatureKind::Page, page.as_mut());
        }
    }

    /// Page names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name())
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page is registered
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
