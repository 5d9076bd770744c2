//! The host's navigation primitives, behind one trait.
//!
//! A [`Platform`] is whatever actually owns the address bar, the document
//! title, and the physical history stack - a browser window, a webview host,
//! or the in-process [`MemoryPlatform`] model. The history controller never
//! talks to the host directly; it probes a platform's capabilities once at
//! construction and then drives it through this trait.

mod memory;

pub use memory::MemoryPlatform;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{state, title, url}` wrapper handed to the native push/replace-state
/// primitives and returned in native pop notifications.
///
/// Only envelopes created by this crate ever come back out of the platform;
/// stack entries the application did not create (such as the page's original
/// load state) carry no envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateEnvelope {
    /// Application-defined page state.
    pub state: Value,
    /// Display title recorded with the entry.
    pub title: String,
    /// Canonical URL recorded with the entry.
    pub url: String,
}

/// Which platform notification a listener is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Native back/forward pop notifications.
    PopState,
    /// URL fragment change notifications.
    FragmentChange,
}

/// A platform-originated notification that the visible navigational position
/// changed.
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformEvent {
    /// A native pop carrying the envelope stored with the now-active entry,
    /// or `None` for entries this crate did not create.
    PopState(Option<StateEnvelope>),
    /// The visible URL fragment changed; the new value is read back from the
    /// platform.
    FragmentChange,
}

/// Host navigation facilities: capability probes, the two storage primitives,
/// physical stack movement, and notification registration.
///
/// All methods are synchronous; notification delivery happens later, when the
/// host either calls `History::notify` directly from its event callback or
/// queues events for `History::pump` to drain via [`poll_event`].
///
/// [`poll_event`]: Platform::poll_event
pub trait Platform {
    /// Whether the platform has a working native push-state primitive.
    fn supports_push_state(&self) -> bool;

    /// Whether this platform family is known to mishandle native history and
    /// should use fragment navigation even when push-state probes as present.
    fn prefers_fragment_navigation(&self) -> bool {
        false
    }

    /// Push a new entry onto the native history stack.
    fn push_state(&mut self, envelope: StateEnvelope, title: &str, url: &str);

    /// Replace the current native history entry.
    fn replace_state(&mut self, envelope: StateEnvelope, title: &str, url: &str);

    /// Physically navigate one entry backward.
    fn back(&mut self);

    /// Physically navigate one entry forward.
    fn forward(&mut self);

    /// The currently visible URL fragment. Implementations may or may not
    /// include the leading `#`; consumers strip it.
    fn fragment(&self) -> String;

    /// Set the visible URL fragment.
    fn set_fragment(&mut self, fragment: &str);

    /// The current document title.
    fn title(&self) -> String;

    /// Set the document title.
    fn set_title(&mut self, title: &str);

    /// Register interest in a notification kind.
    fn bind(&mut self, kind: ListenerKind);

    /// Deregister interest in a notification kind.
    fn unbind(&mut self, kind: ListenerKind);

    /// Take the next queued notification, for hosts that queue rather than
    /// call back. Hosts that deliver directly return `None`.
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        None
    }
}

impl Platform for Box<dyn Platform> {
    fn supports_push_state(&self) -> bool {
        (**self).supports_push_state()
    }

    fn prefers_fragment_navigation(&self) -> bool {
        (**self).prefers_fragment_navigation()
    }

    fn push_state(&mut self, envelope: StateEnvelope, title: &str, url: &str) {
        (**self).push_state(envelope, title, url);
    }

    fn replace_state(&mut self, envelope: StateEnvelope, title: &str, url: &str) {
        (**self).replace_state(envelope, title, url);
    }

    fn back(&mut self) {
        (**self).back();
    }

    fn forward(&mut self) {
        (**self).forward();
    }

    fn fragment(&self) -> String {
        (**self).fragment()
    }

    fn set_fragment(&mut self, fragment: &str) {
        (**self).set_fragment(fragment);
    }

    fn title(&self) -> String {
        (**self).title()
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }

    fn bind(&mut self, kind: ListenerKind) {
        (**self).bind(kind);
    }

    fn unbind(&mut self, kind: ListenerKind) {
        (**self).unbind(kind);
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        (**self).poll_event()
    }
}
