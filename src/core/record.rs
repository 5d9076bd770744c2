//! History records and their opaque identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque unique token identifying a history record.
///
/// Ids are minted once when a record is created and never change afterwards.
/// They exist so the fragment backend can correlate a URL fragment back to the
/// record it was generated from; nothing else should interpret them.
///
/// # Example
///
/// ```rust
/// use backstack::core::RecordId;
///
/// let id = RecordId::new();
/// let parsed: RecordId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a fresh unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The unit of navigable state: an application-defined payload plus the title
/// and canonical URL of the page it belongs to.
///
/// The `state` payload is opaque to this crate; applications put whatever they
/// need to restore the page in it. `state`, `title`, and `url` may be
/// overwritten in place by a replace operation at the same sequence position,
/// but `id` is fixed for the record's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identity token, fixed at creation.
    pub id: RecordId,
    /// Application-defined page state.
    pub state: Value,
    /// Display title associated with the page state.
    pub title: String,
    /// Canonical path/URL for the state.
    pub url: String,
}

impl Record {
    /// Create a record with a freshly minted id.
    pub fn new(state: Value, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_id(RecordId::new(), state, title, url)
    }

    /// Create a record reusing an existing id.
    ///
    /// Used by replace operations, which update a record's content without
    /// changing its navigational identity.
    pub fn with_id(
        id: RecordId,
        state: Value,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            state,
            title: title.into(),
            url: url.into(),
        }
    }
}
