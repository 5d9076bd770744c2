//! In-process platform model.

use super::{ListenerKind, Platform, PlatformEvent, StateEnvelope};
use std::collections::{HashSet, VecDeque};

#[derive(Clone, Debug)]
struct StackEntry {
    envelope: Option<StateEnvelope>,
    url: String,
    fragment: String,
}

/// A complete in-process [`Platform`]: models a browser's history stack,
/// visible fragment, and document title, and queues the notifications a real
/// host would fire.
///
/// The stack is seeded with the page's original load entry, which carries no
/// envelope - exactly like a browser entry created before this crate was
/// active. `back`/`forward` replay entries and queue the matching pop and
/// fragment-change notifications; `set_fragment` records a new entry
/// (discarding forward ones) the way browser hashchange history does.
///
/// It serves as the default platform for the singleton facade and as the
/// vehicle for exercising both backends without a host.
#[derive(Debug)]
pub struct MemoryPlatform {
    entries: Vec<StackEntry>,
    index: usize,
    fragment: String,
    title: String,
    push_state_supported: bool,
    fragment_preferred: bool,
    bound: HashSet<ListenerKind>,
    queue: VecDeque<PlatformEvent>,
}

impl MemoryPlatform {
    /// A platform with full native push-state support, loaded at `/`.
    pub fn new() -> Self {
        Self::with_capabilities(true, false)
    }

    /// A platform whose native push-state primitive is absent, forcing the
    /// fragment backend.
    pub fn legacy() -> Self {
        Self::with_capabilities(false, false)
    }

    /// A platform that probes as push-state capable but belongs to a family
    /// where native history is unreliable.
    pub fn unreliable_native() -> Self {
        Self::with_capabilities(true, true)
    }

    fn with_capabilities(push_state_supported: bool, fragment_preferred: bool) -> Self {
        Self {
            entries: vec![StackEntry {
                envelope: None,
                url: "/".to_string(),
                fragment: String::new(),
            }],
            index: 0,
            fragment: String::new(),
            title: String::new(),
            push_state_supported,
            fragment_preferred,
            bound: HashSet::new(),
            queue: VecDeque::new(),
        }
    }

    /// Number of entries on the modeled history stack.
    pub fn stack_depth(&self) -> usize {
        self.entries.len()
    }

    /// Index of the currently active stack entry.
    pub fn stack_index(&self) -> usize {
        self.index
    }

    /// Whether a listener of the given kind is currently registered.
    pub fn is_bound(&self, kind: ListenerKind) -> bool {
        self.bound.contains(&kind)
    }

    /// Number of notifications waiting to be polled.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    fn activate(&mut self, index: usize) {
        self.index = index;
        let entry = self.entries[index].clone();
        log::debug!(
            "memory platform now at stack entry {index} of {} (url {})",
            self.entries.len(),
            entry.url
        );
        self.queue.push_back(PlatformEvent::PopState(entry.envelope));
        if entry.fragment != self.fragment {
            self.fragment = entry.fragment;
            self.queue.push_back(PlatformEvent::FragmentChange);
        }
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MemoryPlatform {
    fn supports_push_state(&self) -> bool {
        self.push_state_supported
    }

    fn prefers_fragment_navigation(&self) -> bool {
        self.fragment_preferred
    }

    fn push_state(&mut self, envelope: StateEnvelope, _title: &str, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(StackEntry {
            envelope: Some(envelope),
            url: url.to_string(),
            fragment: self.fragment.clone(),
        });
        self.index = self.entries.len() - 1;
    }

    fn replace_state(&mut self, envelope: StateEnvelope, _title: &str, url: &str) {
        self.entries[self.index] = StackEntry {
            envelope: Some(envelope),
            url: url.to_string(),
            fragment: self.fragment.clone(),
        };
    }

    fn back(&mut self) {
        if self.index > 0 {
            self.activate(self.index - 1);
        }
    }

    fn forward(&mut self) {
        if self.index + 1 < self.entries.len() {
            self.activate(self.index + 1);
        }
    }

    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        if fragment == self.fragment {
            return;
        }
        // A fragment write is itself a navigation: it records a stack entry
        // and fires a change notification, like browser hashchange history.
        let url = self.entries[self.index].url.clone();
        self.entries.truncate(self.index + 1);
        self.entries.push(StackEntry {
            envelope: None,
            url,
            fragment: fragment.to_string(),
        });
        self.index = self.entries.len() - 1;
        self.fragment = fragment.to_string();
        self.queue.push_back(PlatformEvent::FragmentChange);
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn bind(&mut self, kind: ListenerKind) {
        self.bound.insert(kind);
    }

    fn unbind(&mut self, kind: ListenerKind) {
        self.bound.remove(&kind);
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.queue.pop_front()
    }
}
