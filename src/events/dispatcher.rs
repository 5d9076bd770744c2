//! Minimal synchronous observer registry.

use std::fmt;

/// Token identifying a registered handler.
///
/// Closures are not comparable in Rust, so unsubscription is by the token
/// returned from [`EventDispatcher::on`] rather than by handler identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HandlerId(u64);

struct HandlerEntry<T> {
    id: HandlerId,
    event: String,
    handler: Box<dyn FnMut(&T)>,
}

/// Name-keyed event dispatcher with synchronous FIFO delivery.
///
/// Handlers for an event are invoked in registration order. Delivery makes no
/// attempt at panic isolation: a handler that panics unwinds through
/// [`trigger`](Self::trigger) and later handlers for that event do not run.
///
/// # Example
///
/// ```rust
/// use backstack::events::EventDispatcher;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let seen_in_handler = Rc::clone(&seen);
/// let id = dispatcher.on("tick", move |n| seen_in_handler.set(*n));
///
/// dispatcher.trigger("tick", &7);
/// assert_eq!(seen.get(), 7);
///
/// assert!(dispatcher.off(id));
/// dispatcher.trigger("tick", &9);
/// assert_eq!(seen.get(), 7);
/// ```
pub struct EventDispatcher<T> {
    entries: Vec<HandlerEntry<T>>,
    next_id: u64,
}

impl<T> EventDispatcher<T> {
    /// Create a dispatcher with no handlers.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler for `event`. Returns the token used to remove it.
    pub fn on<F>(&mut self, event: &str, handler: F) -> HandlerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.entries.push(HandlerEntry {
            id,
            event: event.to_string(),
            handler: Box::new(handler),
        });
        id
    }

    /// Remove the handler registered under `id`.
    ///
    /// Returns false when the token is stale or was never issued by this
    /// dispatcher; never panics.
    pub fn off(&mut self, id: HandlerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Invoke every handler registered for `event`, in registration order.
    pub fn trigger(&mut self, event: &str, payload: &T) {
        for entry in &mut self.entries {
            if entry.event == event {
                (entry.handler)(payload);
            }
        }
    }

    /// Number of handlers currently registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.event == event)
            .count()
    }

    /// Drop all handlers and ready the dispatcher for teardown.
    ///
    /// Triggering after dispose is a no-op. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for EventDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.entries.len())
            .finish()
    }
}
