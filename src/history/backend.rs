//! The navigation backend seam.

use super::PopStateEvent;
use crate::core::Record;
use crate::platform::{ListenerKind, Platform, PlatformEvent};
use serde_json::Value;

/// Which navigation strategy a controller is running on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendMode {
    /// Records live on the platform's native history stack.
    Native,
    /// Records live in an in-memory sequence keyed through the URL fragment.
    Fragment,
}

/// A concrete navigation strategy.
///
/// Selected once at construction and held as an immutable strategy object;
/// the controller never branches on platform capabilities after that point.
/// Both variants must produce identical observable semantics: the same
/// events, the same record shape, the same ordering.
pub(crate) trait NavigationBackend {
    fn mode(&self) -> BackendMode;

    /// The platform notification kind this backend listens for.
    fn listener(&self) -> ListenerKind;

    /// Store a new record as the active navigational position.
    fn push(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str);

    /// Overwrite the record at the active position without moving it.
    fn replace(&mut self, platform: &mut dyn Platform, state: Value, title: &str, url: &str);

    /// Interpret a platform notification.
    ///
    /// Returns the event payload when the notification resolves to a record
    /// this backend recognizes; `None` means the notification was foreign,
    /// stale, or self-triggered and must be ignored.
    fn handle_event(
        &mut self,
        platform: &mut dyn Platform,
        event: &PlatformEvent,
    ) -> Option<PopStateEvent>;

    /// The record at the active position, for backends that materialize
    /// records locally.
    fn current(&self) -> Option<&Record>;
}
