//! Input subscriber registry
//!
//! Subscribers receive every raw platform event, in registration order,
//! alongside (not instead of) the UI layer. The registry is append-only:
//! there is no unsubscribe.

use crate::diagnostics::{isolate_into, DiagnosticSink, FeatureKind};
use crate::events::PlatformEvent;

/// Boxed input subscriber callback
pub type InputSubscriber = Box<dyn FnMut(&PlatformEvent)>;

/// Ordered list of input subscribers
#[derive(Default)]
pub struct InputDispatcher {
    subscribers: Vec<InputSubscriber>,
}

impl InputDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&PlatformEvent) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Deliver `event` to every subscriber, in registration order
    ///
    /// A panicking subscriber is reported to `sink` and delivery continues
    /// with the next one.
    pub fn dispatch(&mut self, event: &PlatformEvent, sink: &mut dyn DiagnosticSink) {
        for (index, subscriber) in self.subscribers.iter_mut().enumerate() {
            isolate_into(sink, FeatureKind::InputSubscriber, &format!("#{index}"), || {
                subscriber(event);
                Ok(())
            });
        }
    }

    /// Number of subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscriber is registered
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::FeatureFault;
    use crate::events::WindowId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn moved() -> PlatformEvent {
        PlatformEvent::MouseMoved { window: WindowId(1), x: 4.0, y: 2.0 }
    }

    #[test]
    fn test_dispatch_reaches_all_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = InputDispatcher::new();
        for id in 0..3 {
            let seen = Rc::clone(&seen);
            dispatcher.subscribe(move |event| seen.borrow_mut().push((id, event.clone())));
        }

        let mut sink: Vec<FeatureFault> = Vec::new();
        dispatcher.dispatch(&moved(), &mut sink);

        let seen = seen.borrow();
        assert_eq!(seen.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(seen.iter().all(|(_, event)| *event == moved()));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_panicking_subscriber_does_not_stop_dispatch() {
        let count = Rc::new(RefCell::new(0));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(|_| panic!("bad subscriber"));
        let counter = Rc::clone(&count);
        dispatcher.subscribe(move |_| *counter.borrow_mut() += 1);

        let mut sink: Vec<FeatureFault> = Vec::new();
        dispatcher.dispatch(&PlatformEvent::Quit, &mut sink);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].kind, FeatureKind::InputSubscriber);
        assert_eq!(sink[0].name, "#0");
    }

    #[test]
    fn test_empty_dispatch_is_noop() {
        let mut dispatcher = InputDispatcher::new();
        let mut sink: Vec<FeatureFault> = Vec::new();
        dispatcher.dispatch(&PlatformEvent::Quit, &mut sink);
        assert!(dispatcher.is_empty());
        assert!(sink.is_empty());
    }
}
