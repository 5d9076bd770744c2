//! Backstack: an event-driven browser navigation-history abstraction.
//!
//! Backstack unifies two incompatible platform facilities - native
//! history-stack manipulation and legacy URL-fragment ("hash") signaling -
//! behind one API. Applications push and replace logical page states
//! (arbitrary data + title + URL) and subscribe to `popstate` to learn about
//! backward/forward navigation, without knowing which mechanism is active.
//!
//! # Core Concepts
//!
//! - **Record**: the stored tuple of opaque state, title, and URL, keyed by
//!   an opaque id
//! - **Platform**: the host's navigation primitives, behind the
//!   [`Platform`] trait; [`MemoryPlatform`] is a complete in-process model
//! - **Backend**: the strategy storing records - the platform's native stack,
//!   or an in-memory sequence keyed through the URL fragment - selected once
//!   at construction
//! - **Singleton facade**: free functions in [`singleton`] over one
//!   lazily-constructed controller per UI thread
//!
//! # Example
//!
//! ```rust
//! use backstack::{singleton, BackendMode};
//! use serde_json::json;
//!
//! // Force the fragment backend and seed the first page state.
//! let mode = singleton::init(true);
//! assert_eq!(mode, BackendMode::Fragment);
//! singleton::replace(json!({}), "Home", "/");
//! singleton::push(json!({"q": "rust"}), "Search", "/search");
//! assert!(singleton::has_history());
//!
//! let _sub = singleton::on("popstate", |event| {
//!     println!("navigated to {}", event.url);
//! });
//!
//! singleton::back(); // the platform moves its stack
//! singleton::pump(); // deliver the queued notification
//!
//! assert!(!singleton::has_history());
//! assert_eq!(singleton::current().unwrap().url, "/");
//! # singleton::dispose();
//! ```

pub mod core;
pub mod events;
pub mod history;
pub mod platform;

// Re-export commonly used types
pub use crate::core::{Record, RecordId, Sequence};
pub use events::{EventDispatcher, HandlerId};
pub use history::{select_mode, singleton, BackendMode, History, PopStateEvent, POPSTATE};
pub use platform::{ListenerKind, MemoryPlatform, Platform, PlatformEvent, StateEnvelope};
