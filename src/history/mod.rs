//! The history controller and its navigation backends.
//!
//! [`History`] unifies two incompatible platform facilities - native
//! history-stack manipulation and legacy URL-fragment signaling - behind one
//! event-driven API. Applications push and replace page states and subscribe
//! to [`POPSTATE`] to learn about backward/forward navigation; which backend
//! is active is decided once, at construction, and is invisible afterwards.

mod backend;
mod fragment;
mod native;
pub mod singleton;

pub use backend::BackendMode;

use crate::core::Record;
use crate::events::{EventDispatcher, HandlerId};
use crate::platform::{Platform, PlatformEvent, StateEnvelope};
use backend::NavigationBackend;
use fragment::FragmentBackend;
use native::NativeBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the navigation event fired by the controller.
pub const POPSTATE: &str = "popstate";

/// Payload delivered to `popstate` handlers: the state, title, and URL of the
/// record the user navigated to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopStateEvent {
    pub state: Value,
    pub title: String,
    pub url: String,
}

impl From<StateEnvelope> for PopStateEvent {
    fn from(envelope: StateEnvelope) -> Self {
        Self {
            state: envelope.state,
            title: envelope.title,
            url: envelope.url,
        }
    }
}

/// Bookkeeping shared by both backends, owned by the controller rather than
/// scattered through module statics.
#[derive(Clone, Copy, Debug, Default)]
struct Bookkeeping {
    /// Set by the first replace; until then, pushes seed state instead of
    /// pushing.
    has_replaced_once: bool,
    /// Outstanding application-created navigations not yet unwound by an
    /// accepted pop notification. Signed: forward navigations also arrive as
    /// pops and decrement it.
    pending_back: i64,
}

/// Decide which backend a platform should run on.
///
/// Native wins when the platform probes as push-state capable and is not
/// flagged as a family where native history is unreliable; everything else
/// falls back to the fragment backend.
pub fn select_mode(platform: &dyn Platform) -> BackendMode {
    if platform.supports_push_state() && !platform.prefers_fragment_navigation() {
        BackendMode::Native
    } else {
        BackendMode::Fragment
    }
}

/// Browser navigation-history abstraction.
///
/// One controller owns one platform and one backend for its whole lifetime.
/// `push`/`replace` record page states; platform notifications arrive through
/// [`notify`](Self::notify) (or [`pump`](Self::pump) for queueing hosts) and
/// fan out to `popstate` subscribers when they resolve to a record this
/// controller created.
///
/// # Example
///
/// ```rust
/// use backstack::{History, MemoryPlatform, POPSTATE};
/// use serde_json::json;
///
/// let mut history = History::new(MemoryPlatform::legacy());
/// history.replace(json!({}), "Home", "/");
/// history.push(json!({"q": "cats"}), "Search", "/search");
/// assert!(history.has_history());
///
/// history.on(POPSTATE, |event| println!("back to {}", event.url));
/// history.back();
/// history.pump();
/// assert!(!history.has_history());
/// assert_eq!(history.current().unwrap().url, "/");
/// ```
pub struct History<P: Platform> {
    platform: P,
    backend: Box<dyn NavigationBackend>,
    dispatcher: EventDispatcher<PopStateEvent>,
    books: Bookkeeping,
    listener_bound: bool,
}

impl<P: Platform> History<P> {
    /// Create a controller, selecting the backend from the platform's
    /// capabilities (see [`select_mode`]).
    pub fn new(platform: P) -> Self {
        let mode = select_mode(&platform);
        Self::with_mode(platform, mode)
    }

    /// Create a controller on an explicitly chosen backend.
    pub fn with_mode(mut platform: P, mode: BackendMode) -> Self {
        let backend: Box<dyn NavigationBackend> = match mode {
            BackendMode::Native => Box::new(NativeBackend),
            BackendMode::Fragment => Box::new(FragmentBackend::new()),
        };
        platform.bind(backend.listener());
        log::debug!("history controller starting in {mode:?} mode");
        Self {
            platform,
            backend,
            dispatcher: EventDispatcher::new(),
            books: Bookkeeping::default(),
            listener_bound: true,
        }
    }

    /// The backend this controller was constructed on.
    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    /// Borrow the owned platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutably borrow the owned platform (e.g. to simulate external
    /// navigation in tests, or to drive a host-specific surface).
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// The record at the current position, or `None` if none.
    ///
    /// The native backend delegates storage to the platform and materializes
    /// nothing locally, so it always reports `None`.
    pub fn current(&self) -> Option<&Record> {
        self.backend.current()
    }

    /// Whether the application has at least one self-created navigation it
    /// could go back through.
    ///
    /// Distinct from the platform's own stack depth, which may include
    /// entries this controller never created.
    pub fn has_history(&self) -> bool {
        self.books.pending_back > 0
    }

    /// Record a new page state and make it the active position.
    ///
    /// Until the first [`replace`](Self::replace) has seeded state, a push
    /// behaves exactly as a replace and does not count toward
    /// [`has_history`](Self::has_history); there is always a seed record
    /// before any push-created record exists.
    pub fn push(&mut self, state: Value, title: &str, url: &str) {
        if !self.books.has_replaced_once {
            return self.replace(state, title, url);
        }
        self.books.pending_back += 1;
        log::debug!(
            "push {url} ({} outstanding back entries)",
            self.books.pending_back
        );
        self.platform.set_title(title);
        self.backend.push(&mut self.platform, state, title, url);
    }

    /// Overwrite the current page state without changing the navigational
    /// position.
    pub fn replace(&mut self, state: Value, title: &str, url: &str) {
        self.books.has_replaced_once = true;
        log::debug!("replace {url}");
        self.platform.set_title(title);
        self.backend.replace(&mut self.platform, state, title, url);
    }

    /// Go to the previous history state via the platform's native primitive.
    pub fn back(&mut self) {
        self.platform.back();
    }

    /// Go to the next history state via the platform's native primitive.
    pub fn forward(&mut self) {
        self.platform.forward();
    }

    /// Subscribe a handler; returns the token for [`off`](Self::off).
    pub fn on<F>(&mut self, event: &str, handler: F) -> HandlerId
    where
        F: FnMut(&PopStateEvent) + 'static,
    {
        self.dispatcher.on(event, handler)
    }

    /// Unsubscribe a handler. Returns false for stale tokens; never panics.
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.dispatcher.off(id)
    }

    /// Feed one platform notification into the active backend.
    ///
    /// An accepted notification - one that resolves to a record this
    /// controller created - decrements the outstanding back-count and fires
    /// `popstate`. Everything else is ignored. No-op after
    /// [`dispose`](Self::dispose).
    pub fn notify(&mut self, event: PlatformEvent) {
        if !self.listener_bound {
            return;
        }
        if let Some(emitted) = self.backend.handle_event(&mut self.platform, &event) {
            self.books.pending_back -= 1;
            log::debug!(
                "popstate {} ({} outstanding back entries)",
                emitted.url,
                self.books.pending_back
            );
            self.dispatcher.trigger(POPSTATE, &emitted);
        }
    }

    /// Drain every queued platform notification through
    /// [`notify`](Self::notify).
    pub fn pump(&mut self) {
        while let Some(event) = self.platform.poll_event() {
            self.notify(event);
        }
    }

    /// Unbind the platform listener and drop all subscribers.
    ///
    /// Idempotent: calling twice must not panic, and leaves no active
    /// listener either time.
    pub fn dispose(&mut self) {
        if self.listener_bound {
            self.platform.unbind(self.backend.listener());
            self.listener_bound = false;
        }
        self.dispatcher.dispose();
    }

    /// Whether the platform listener is still attached.
    pub fn is_listening(&self) -> bool {
        self.listener_bound
    }
}
