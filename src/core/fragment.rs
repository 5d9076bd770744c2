//! Wire format for encoding record identity into the URL fragment.
//!
//! The fallback backend has nowhere to store state on the platform, so it
//! writes `<url>#@<id>` into the visible fragment and resolves it back to a
//! record when the fragment changes. Anything that does not match the format,
//! or whose id is unknown, is ignored by the caller.

use super::record::RecordId;
use thiserror::Error;

/// Literal delimiter between the display URL and the record id.
pub const MARKER: &str = "#@";

/// Errors produced when decoding a visible fragment.
///
/// Callers treat these as "not ours": a fragment that fails to decode is
/// silently ignored rather than surfaced to the application.
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("fragment has no record marker")]
    MissingMarker,

    #[error("fragment record id is not valid: {0}")]
    InvalidId(#[from] uuid::Error),
}

/// A successfully decoded fragment: the display URL and the record id.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedFragment<'a> {
    pub url: &'a str,
    pub id: RecordId,
}

/// Encode a record's canonical fragment representation.
///
/// # Example
///
/// ```rust
/// use backstack::core::fragment;
/// use backstack::core::RecordId;
///
/// let id = RecordId::new();
/// let encoded = fragment::encode("/search", id);
/// assert_eq!(encoded, format!("/search#@{id}"));
/// ```
pub fn encode(url: &str, id: RecordId) -> String {
    format!("{url}{MARKER}{id}")
}

/// Strip the leading `#` separator some platforms include in the fragment.
pub fn strip_separator(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Decode a fragment previously produced by [`encode`].
///
/// # Example
///
/// ```rust
/// use backstack::core::fragment;
/// use backstack::core::RecordId;
///
/// let id = RecordId::new();
/// let parsed = fragment::parse(&fragment::encode("/p", id)).unwrap();
/// assert_eq!(parsed.url, "/p");
/// assert_eq!(parsed.id, id);
/// ```
pub fn parse(fragment: &str) -> Result<ParsedFragment<'_>, FragmentError> {
    let (url, id) = fragment
        .split_once(MARKER)
        .ok_or(FragmentError::MissingMarker)?;
    let id = id.parse()?;
    Ok(ParsedFragment { url, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_parse_recovers_url_and_id() {
        let id = RecordId::new();
        let encoded = encode("/docs/intro", id);
        let parsed = parse(&encoded).unwrap();

        assert_eq!(parsed.url, "/docs/intro");
        assert_eq!(parsed.id, id);
    }

    #[test]
    fn parse_rejects_fragment_without_marker() {
        assert!(matches!(
            parse("/plain-hash-link"),
            Err(FragmentError::MissingMarker)
        ));
    }

    #[test]
    fn parse_rejects_malformed_id() {
        assert!(matches!(
            parse("/p#@not-a-uuid"),
            Err(FragmentError::InvalidId(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_id() {
        assert!(parse("/p#@").is_err());
    }

    #[test]
    fn strip_separator_removes_single_leading_hash() {
        assert_eq!(strip_separator("#/p#@abc"), "/p#@abc");
        assert_eq!(strip_separator("/p#@abc"), "/p#@abc");
        assert_eq!(strip_separator(""), "");
    }

    #[test]
    fn empty_url_still_roundtrips() {
        let id = RecordId::new();
        let encoded = encode("", id);
        let parsed = parse(&encoded).unwrap();
        assert_eq!(parsed.url, "");
        assert_eq!(parsed.id, id);
    }
}
