//! Singleton lifecycle facade.
//!
//! A thread-owned slot holds at most one [`History`] controller; every free
//! function here is an initialize-if-needed wrapper over it, so application
//! code can navigate without threading a controller handle around. The core
//! is single-threaded by contract, so each UI thread owns its own slot and
//! standards-mode override flag.
//!
//! Re-entrancy: the slot is borrowed while `popstate` handlers run, so
//! handlers must not call back into these free functions. Subscribe, record
//! what happened, and act after delivery returns.

use super::{select_mode, BackendMode, History, PopStateEvent};
use crate::core::Record;
use crate::events::HandlerId;
use crate::platform::{MemoryPlatform, Platform};
use serde_json::Value;
use std::cell::{Cell, RefCell};

thread_local! {
    static INSTANCE: RefCell<Option<History<Box<dyn Platform>>>> = const { RefCell::new(None) };
    static FORCE_FRAGMENT: Cell<bool> = const { Cell::new(false) };
}

/// Force fragment mode for every controller constructed after this call,
/// regardless of platform capability.
///
/// Must be invoked before the singleton is first constructed to take effect
/// on it; an already-running instance keeps its backend.
pub fn override_standards_mode() {
    FORCE_FRAGMENT.set(true);
}

/// Whether standards mode has been overridden on this thread.
pub fn standards_overridden() -> bool {
    FORCE_FRAGMENT.get()
}

/// Initialize the singleton against the default in-process platform.
///
/// Idempotent: the first call constructs the instance (optionally forcing
/// fragment mode first); later calls return the existing instance's mode even
/// if `use_hash` differs.
pub fn init(use_hash: bool) -> BackendMode {
    init_with(Box::new(MemoryPlatform::new()), use_hash)
}

/// Initialize the singleton against an embedder-supplied platform.
///
/// Idempotent like [`init`]; when the singleton already exists the supplied
/// platform is dropped.
pub fn init_with(platform: Box<dyn Platform>, use_hash: bool) -> BackendMode {
    if use_hash {
        override_standards_mode();
    }
    INSTANCE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let instance = slot.get_or_insert_with(|| construct(platform));
        instance.mode()
    })
}

fn construct(platform: Box<dyn Platform>) -> History<Box<dyn Platform>> {
    let mode = if FORCE_FRAGMENT.get() {
        BackendMode::Fragment
    } else {
        select_mode(&platform)
    };
    History::with_mode(platform, mode)
}

/// Run `f` against the singleton, initializing it first if needed.
pub fn with<R>(f: impl FnOnce(&mut History<Box<dyn Platform>>) -> R) -> R {
    INSTANCE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let instance = slot.get_or_insert_with(|| construct(Box::new(MemoryPlatform::new())));
        f(instance)
    })
}

/// Whether the singleton has been constructed on this thread.
pub fn is_initialized() -> bool {
    INSTANCE.with(|slot| slot.borrow().is_some())
}

/// Record a new page state. See [`History::push`].
pub fn push(state: Value, title: &str, url: &str) {
    with(|history| history.push(state, title, url));
}

/// Overwrite the current page state. See [`History::replace`].
pub fn replace(state: Value, title: &str, url: &str) {
    with(|history| history.replace(state, title, url));
}

/// Go to the previous history state.
///
/// Always delegates directly to the platform's native back primitive; both
/// backends rely on the platform to physically move through its stack.
pub fn back() {
    with(|history| history.back());
}

/// Go to the next history state via the platform's native forward primitive.
pub fn forward() {
    with(|history| history.forward());
}

/// Subscribe to `popstate`; returns the token for [`off`].
pub fn on<F>(event: &str, handler: F) -> HandlerId
where
    F: FnMut(&PopStateEvent) + 'static,
{
    with(|history| history.on(event, handler))
}

/// Unsubscribe a handler registered through [`on`].
pub fn off(id: HandlerId) -> bool {
    with(|history| history.off(id))
}

/// Clone of the record at the current position, if any.
pub fn current() -> Option<Record> {
    with(|history| history.current().cloned())
}

/// Whether the application has self-created history to go back through.
pub fn has_history() -> bool {
    with(|history| history.has_history())
}

/// Drain queued platform notifications through the singleton.
pub fn pump() {
    with(|history| history.pump());
}

/// Dispose the singleton and clear the slot.
///
/// A later free-function call constructs a fresh instance. Calling this when
/// nothing was initialized is a no-op. The standards-mode override survives
/// for the remainder of the thread, matching its process-lifetime contract.
pub fn dispose() {
    INSTANCE.with(|slot| {
        if let Some(mut instance) = slot.borrow_mut().take() {
            instance.dispose();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::POPSTATE;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Each test runs on its own thread under the default harness, so each
    // sees a fresh slot; a guard keeps a test from leaking state into a
    // same-thread successor anyway.
    struct Reset;
    impl Drop for Reset {
        fn drop(&mut self) {
            dispose();
            FORCE_FRAGMENT.set(false);
        }
    }

    #[test]
    fn init_is_idempotent_even_with_a_different_flag() {
        let _reset = Reset;
        let first = init(false);
        assert_eq!(first, BackendMode::Native);

        // The instance already exists; the hash request is too late.
        let second = init(true);
        assert_eq!(second, BackendMode::Native);
    }

    #[test]
    fn init_with_hash_forces_fragment_mode() {
        let _reset = Reset;
        assert_eq!(init(true), BackendMode::Fragment);
    }

    #[test]
    fn override_before_init_forces_fragment_mode() {
        let _reset = Reset;
        override_standards_mode();
        assert_eq!(init(false), BackendMode::Fragment);
    }

    #[test]
    fn free_functions_initialize_transparently() {
        let _reset = Reset;
        assert!(!is_initialized());

        push(json!({"seed": true}), "Home", "/");

        assert!(is_initialized());
        // The first push seeded state instead of pushing.
        assert!(!has_history());

        push(json!({}), "A", "/a");
        assert!(has_history());
    }

    #[test]
    fn full_navigation_cycle_through_the_facade() {
        let _reset = Reset;
        init(true);

        replace(json!({}), "Home", "/");
        push(json!({"q": "x"}), "Search", "/search");
        assert!(has_history());

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = on(POPSTATE, move |event| sink.borrow_mut().push(event.url.clone()));

        back();
        pump();

        assert_eq!(*log.borrow(), vec!["/".to_string()]);
        assert!(!has_history());
        assert!(off(sub));
    }

    #[test]
    fn dispose_clears_the_slot_and_a_fresh_instance_follows() {
        let _reset = Reset;
        init(false);
        push(json!({}), "Home", "/");
        push(json!({}), "A", "/a");
        assert!(has_history());

        dispose();
        assert!(!is_initialized());

        // Next use transparently constructs a fresh controller.
        assert!(!has_history());
        assert!(is_initialized());
    }

    #[test]
    fn dispose_without_init_is_a_no_op() {
        let _reset = Reset;
        dispose();
        dispose();
        assert!(!is_initialized());
    }
}
