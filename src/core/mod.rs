//! Core navigation data model.
//!
//! This module contains the backend-independent pieces of the history
//! abstraction:
//! - Records and their opaque identifiers
//! - The ordered record sequence used by the fragment backend
//! - The `<url>#@<id>` fragment wire format
//!
//! Nothing here touches the platform; all logic is pure data manipulation.

pub mod fragment;
mod record;
mod sequence;

pub use fragment::{FragmentError, ParsedFragment};
pub use record::{Record, RecordId};
pub use sequence::Sequence;
