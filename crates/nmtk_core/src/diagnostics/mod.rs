//! Feature failure capture
//!
//! Pages, menu items, overlays and input subscribers are supplied by the
//! embedding application. A failure in one of them (an `Err` return or a
//! panic) is captured here, turned into a [`FeatureFault`] and handed to a
//! [`DiagnosticSink`]. It never reaches the frame loop.
//!
//! Panics caught here are reported through the sink only. The process panic
//! hook stays silent while a capability runs and forwards every other panic
//! to the hook that was installed before.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use thiserror::Error;

/// Error returned by feature render capabilities
#[derive(Error, Debug)]
pub enum FeatureError {
    /// Free-form failure
    #[error("{0}")]
    Custom(String),

    /// IO failure inside the feature
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error type
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl FeatureError {
    /// Convenience constructor for [`FeatureError::Custom`]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Which kind of feature failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// A registered page
    Page,
    /// An item inside a menu group
    MenuItem,
    /// A registered overlay
    Overlay,
    /// An input subscriber callback
    InputSubscriber,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Page => "page",
            Self::MenuItem => "menu item",
            Self::Overlay => "overlay",
            Self::InputSubscriber => "input subscriber",
        };
        f.write_str(label)
    }
}

/// A captured feature failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFault {
    /// Kind of feature
    pub kind: FeatureKind,
    /// Display name of the feature (page name, `group/index`, `#index`)
    pub name: String,
    /// Error or panic message
    pub message: String,
    /// Whether the failure was a panic rather than an `Err`
    pub panicked: bool,
}

impl fmt::Display for FeatureFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = if self.panicked { "panicked" } else { "failed" };
        write!(f, "{} '{}' {}: {}", self.kind, self.name, how, self.message)
    }
}

/// Receiver for captured feature failures
pub trait DiagnosticSink {
    /// Record one failure
    fn report(&mut self, fault: FeatureFault);
}

/// Default sink: writes every fault to the error log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, fault: FeatureFault) {
        log::error!("{fault}");
    }
}

/// Collecting sink, mostly useful in tests
impl DiagnosticSink for Vec<FeatureFault> {
    fn report(&mut self, fault: FeatureFault) {
        self.push(fault);
    }
}

thread_local! {
    static ISOLATION_DEPTH: Cell<u32> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Whether the current thread is inside [`isolate`]
pub(crate) fn isolating() -> bool {
    ISOLATION_DEPTH.with(|depth| depth.get() > 0)
}

/// Marks the current thread as isolating until dropped, unwinding included
struct IsolationGuard;

impl IsolationGuard {
    fn enter() -> Self {
        ISOLATION_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self
    }
}

impl Drop for IsolationGuard {
    fn drop(&mut self) {
        ISOLATION_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !isolating() {
                previous(info);
            }
        }));
    });
}

/// Run a feature capability, capturing both `Err` returns and panics
pub fn isolate<F>(kind: FeatureKind, name: &str, capability: F) -> Result<(), FeatureFault>
where
    F: FnOnce() -> Result<(), FeatureError>,
{
    install_quiet_hook();
    let outcome = {
        let _guard = IsolationGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(capability))
    };
    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(FeatureFault {
            kind,
            name: name.to_owned(),
            message: err.to_string(),
            panicked: false,
        }),
        Err(payload) => Err(FeatureFault {
            kind,
            name: name.to_owned(),
            message: panic_message(payload.as_ref()),
            panicked: true,
        }),
    }
}

/// Run a capability and send any failure to `sink`
pub fn isolate_into<F>(sink: &mut dyn DiagnosticSink, kind: FeatureKind, name: &str, capability: F)
where
    F: FnOnce() -> Result<(), FeatureError>,
{
    if let Err(fault) = isolate(kind, name, capability) {
        sink.report(fault);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
