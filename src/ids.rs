//! Request identifiers carried through every dispatch stage.
//!
//! A transport may forward an upstream id in the `x-request-id` header; a
//! valid ULID there is adopted so logs from both sides correlate. Anything
//! else gets a fresh id.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::dispatcher::HeaderVec;

/// Header a transport may use to propagate an existing request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ULID-backed id for one dispatched request
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Adopt the id from `x-request-id` in `headers`, or mint one
    ///
    /// Header lookup is case-insensitive; the last occurrence wins.
    #[must_use]
    pub fn from_headers(headers: &HeaderVec) -> Self {
        let value = headers
            .iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(REQUEST_ID_HEADER))
            .map(|(_, value)| value.as_str());
        Self::from_header_or_new(value)
    }

    /// Parse a header value; blank or malformed values yield a fresh id
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    ///
    /// For an adopted id this is when the upstream issued it.
    #[must_use]
    pub fn issued_at_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}
