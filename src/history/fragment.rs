//! Fragment-sequence backend.
//!
//! The fallback for platforms without a usable native push-state primitive.
//! Records are kept in an in-memory [`Sequence`]; the record's id is encoded
//! into the visible URL fragment as `<url>#@<id>`, and fragment-change
//! notifications are resolved back to records by scanning the sequence.
//!
//! Writing the fragment re-triggers the platform's own change notification,
//! so the last written value is remembered and matching notifications are
//! suppressed. Fragments that fail to decode, or whose id is unknown, are
//! ignored without touching the cursor.

use super::backend::{BackendMode, NavigationBackend};
use super::PopStateEvent;
use crate::core::{fragment, Record, Sequence};
use crate::platform::{ListenerKind, Platform, PlatformEvent};
use serde_json::Value;

pub(crate) struct FragmentBackend {
    sequence: Sequence,
    last_fragment: Option<String>,
}

impl FragmentBackend {
    pub(crate) fn new() -> Self {
        Self {
            sequence: Sequence::new(),
            last_fragment: None,
        }
    }

    fn write(&mut self, platform: &mut dyn Platform, record: Record, advance: bool) {
        let encoded = fragment::encode(&record.url, record.id);
        if advance {
            self.sequence.advance(record);
        } else {
            self.sequence.write_current(record);
        }
        platform.set_fragment(&encoded);
        self.last_fragment = Some(encoded);
    }
}

impl NavigationBackend for FragmentBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Fragment
    }

    fn listener(&self) -> ListenerKind {
        ListenerKind::FragmentChange
    }

    fn push(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str) {
        self.write(platform, Record::new(state, title, url), true);
    }

    fn replace(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str) {
        // Replace keeps the current record's navigational identity; a fresh
        // id is minted only when there is nothing at the cursor yet.
        let record = match self.sequence.current() {
            Some(current) => Record::with_id(current.id, state, title, url),
            None => Record::new(state, title, url),
        };
        self.write(platform, record, false);
    }

    fn handle_event(
        &mut self,
        platform: &mut dyn Platform,
        event: &PlatformEvent,
    ) -> Option<PopStateEvent> {
        if !matches!(event, PlatformEvent::FragmentChange) {
            return None;
        }

        let raw = platform.fragment();
        let visible = fragment::strip_separator(&raw).to_string();
        if self.last_fragment.as_deref() == Some(visible.as_str()) {
            log::trace!("suppressing self-triggered fragment change");
            return None;
        }
        self.last_fragment = Some(visible.clone());
        if visible.is_empty() {
            return None;
        }

        let id = match fragment::parse(&visible) {
            Ok(parsed) => parsed.id,
            Err(err) => {
                log::debug!("ignoring foreign fragment {visible:?}: {err}");
                return None;
            }
        };
        let Some(index) = self.sequence.find_by_id(id) else {
            log::debug!("ignoring fragment with unknown record id {id}");
            return None;
        };

        self.sequence.set_position(index);
        let record = self.sequence.get(index)?;
        let emitted = PopStateEvent {
            state: record.state.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
        };

        // Re-synchronize the address bar and title to the record's canonical
        // representation.
        let canonical = fragment::encode(&emitted.url, record.id);
        platform.set_fragment(&canonical);
        platform.set_title(&emitted.title);
        self.last_fragment = Some(canonical);

        Some(emitted)
    }

    fn current(&self) -> Option<&Record> {
        self.sequence.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordId;
    use crate::platform::MemoryPlatform;
    use serde_json::json;

    fn seeded() -> (MemoryPlatform, FragmentBackend) {
        let mut platform = MemoryPlatform::legacy();
        let mut backend = FragmentBackend::new();
        backend.replace(&mut platform, json!({}), "Seed", "/");
        (platform, backend)
    }

    fn drain(platform: &mut MemoryPlatform, backend: &mut FragmentBackend) -> Vec<PopStateEvent> {
        let mut emitted = Vec::new();
        while let Some(event) = platform.poll_event() {
            if let Some(pop) = backend.handle_event(platform, &event) {
                emitted.push(pop);
            }
        }
        emitted
    }

    #[test]
    fn push_encodes_the_record_id_into_the_fragment() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({"q": 1}), "Search", "/search");

        let current = backend.current().unwrap();
        assert_eq!(
            platform.fragment(),
            format!("/search#@{}", current.id)
        );
    }

    #[test]
    fn self_triggered_change_is_suppressed() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({}), "A", "/a");

        // The platform queued change notifications for the writes above;
        // none of them may come back out as popstate.
        assert!(drain(&mut platform, &mut backend).is_empty());
    }

    #[test]
    fn navigating_to_an_earlier_fragment_emits_its_record() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({"page": "a"}), "A", "/a");
        backend.push(&mut platform, json!({"page": "b"}), "B", "/b");
        drain(&mut platform, &mut backend);

        platform.back();
        let emitted = drain(&mut platform, &mut backend);

        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].url, "/a");
        assert_eq!(emitted[0].state, json!({"page": "a"}));
        assert_eq!(backend.current().unwrap().url, "/a");
        assert_eq!(platform.title(), "A");
    }

    #[test]
    fn unknown_record_id_is_inert() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({}), "A", "/a");
        drain(&mut platform, &mut backend);
        let position_before = backend.current().unwrap().id;

        platform.set_fragment(&format!("/x#@{}", RecordId::new()));
        let emitted = drain(&mut platform, &mut backend);

        assert!(emitted.is_empty());
        assert_eq!(backend.current().unwrap().id, position_before);
    }

    #[test]
    fn undecodable_fragment_is_inert() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({}), "A", "/a");
        drain(&mut platform, &mut backend);

        platform.set_fragment("/plain-anchor");
        let emitted = drain(&mut platform, &mut backend);

        assert!(emitted.is_empty());
        assert_eq!(backend.current().unwrap().url, "/a");
    }

    #[test]
    fn replace_reuses_the_current_record_id() {
        let (mut platform, mut backend) = seeded();
        let seed_id = backend.current().unwrap().id;

        backend.replace(&mut platform, json!({"v": 2}), "Seed v2", "/v2");

        let current = backend.current().unwrap();
        assert_eq!(current.id, seed_id);
        assert_eq!(current.url, "/v2");
    }

    #[test]
    fn overwritten_record_cannot_be_resurrected() {
        let (mut platform, mut backend) = seeded();
        backend.push(&mut platform, json!({}), "A", "/a");
        backend.push(&mut platform, json!({}), "B", "/b");
        let stale = backend.current().unwrap().id;
        drain(&mut platform, &mut backend);

        platform.back();
        drain(&mut platform, &mut backend);

        backend.push(&mut platform, json!({}), "C", "/c");
        drain(&mut platform, &mut backend);
        assert_eq!(backend.current().unwrap().url, "/c");

        platform.set_fragment(&format!("/b#@{stale}"));
        let emitted = drain(&mut platform, &mut backend);

        assert!(emitted.is_empty());
        assert_eq!(backend.current().unwrap().url, "/c");
    }
}
