//! Redaction wrapper for sensitive column values
//!
//! Relational columns flagged `sensitive` (password digests, tokens) are
//! wrapped in `Sensitive<T>` before they reach a log line or terminal.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper whose `Debug` and `Display` never reveal the inner value
///
/// ```
/// use isograph_core_types::Sensitive;
///
/// let digest = Sensitive::new("$2a$12$abc");
/// assert_eq!(format!("{digest}"), "***REDACTED***");
/// assert_eq!(digest.expose(), &"$2a$12$abc");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the real value; call sites should be easy to audit
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
