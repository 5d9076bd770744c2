//! Event dispatch for application-facing notifications.
//!
//! A small observer-pattern registry: handlers subscribe by event name and are
//! delivered synchronously in FIFO registration order. The history controller
//! uses it to fan out `popstate` events; it carries no navigation logic of its
//! own.

mod dispatcher;

pub use dispatcher::{EventDispatcher, HandlerId};
