//! Native history-stack backend.
//!
//! Storage is delegated entirely to the platform: push and replace wrap the
//! page state in an envelope and hand it to the native primitives, and pop
//! notifications give the envelope back. Nothing is materialized locally.

use super::backend::{BackendMode, NavigationBackend};
use super::PopStateEvent;
use crate::core::Record;
use crate::platform::{ListenerKind, Platform, PlatformEvent, StateEnvelope};
use serde_json::Value;

pub(crate) struct NativeBackend;

impl NavigationBackend for NativeBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Native
    }

    fn listener(&self) -> ListenerKind {
        ListenerKind::PopState
    }

    fn push(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str) {
        let envelope = StateEnvelope {
            state,
            title: title.to_string(),
            url: url.to_string(),
        };
        platform.push_state(envelope, title, url);
    }

    fn replace(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str) {
        let envelope = StateEnvelope {
            state,
            title: title.to_string(),
            url: url.to_string(),
        };
        platform.replace_state(envelope, title, url);
    }

    fn handle_event(
        &mut self,
        _platform: &mut dyn Platform,
        event: &PlatformEvent,
    ) -> Option<PopStateEvent> {
        match event {
            PlatformEvent::PopState(Some(envelope)) => Some(envelope.clone().into()),
            PlatformEvent::PopState(None) => {
                // Entries without an envelope were not created by this
                // controller (e.g. the page's original load state); they
                // never fire popstate.
                log::debug!("ignoring pop for a foreign history entry");
                None
            }
            PlatformEvent::FragmentChange => None,
        }
    }

    fn current(&self) -> Option<&Record> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryPlatform;
    use serde_json::json;

    #[test]
    fn push_hands_an_envelope_to_the_platform() {
        let mut platform = MemoryPlatform::new();
        let mut backend = NativeBackend;

        backend.push(&mut platform, json!({"n": 1}), "A", "/a");
        platform.back();

        match platform.poll_event() {
            Some(PlatformEvent::PopState(None)) => {}
            other => panic!("expected the foreign initial entry, got {other:?}"),
        }
    }

    #[test]
    fn enveloped_pop_is_reemitted() {
        let mut platform = MemoryPlatform::new();
        let mut backend = NativeBackend;

        let event = PlatformEvent::PopState(Some(StateEnvelope {
            state: json!({"n": 2}),
            title: "B".to_string(),
            url: "/b".to_string(),
        }));

        let emitted = backend.handle_event(&mut platform, &event).unwrap();
        assert_eq!(emitted.url, "/b");
        assert_eq!(emitted.title, "B");
        assert_eq!(emitted.state, json!({"n": 2}));
    }

    #[test]
    fn empty_envelope_and_fragment_events_are_ignored() {
        let mut platform = MemoryPlatform::new();
        let mut backend = NativeBackend;

        assert!(backend
            .handle_event(&mut platform, &PlatformEvent::PopState(None))
            .is_none());
        assert!(backend
            .handle_event(&mut platform, &PlatformEvent::FragmentChange)
            .is_none());
    }

    #[test]
    fn native_backend_materializes_no_records() {
        let backend = NativeBackend;
        assert!(backend.current().is_none());
    }
}
