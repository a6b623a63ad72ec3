//! Service identifier formats.
//!
//! Some OVHcloud services are addressed by a fixed-shape hexadecimal identifier.
//! An [`IdentifierFormat`] holds the pattern of such a shape as a constant, and
//! matching against it compiles the pattern on each call.

use crate::{Error, Result};
use regex::Regex;
use tracing::warn;

/// Pattern of public cloud project identifiers.
pub const PUBLIC_CLOUD_PROJECT_PATTERN: &str = r"^[0-9a-f]{12}4[0-9a-f]{19}$";

/// Public cloud project identifier: 32 lowercase hex characters with a
/// literal `4` at position 13.
pub const PUBLIC_CLOUD_PROJECT_ID: IdentifierFormat =
    IdentifierFormat::new(PUBLIC_CLOUD_PROJECT_PATTERN);

/// Returns true if `candidate` matches `pattern`.
///
/// # Errors
///
/// Returns [`Error::InternalError`] if `pattern` is not a valid regex.
pub fn matches(pattern: &str, candidate: &str) -> Result<bool> {
    let regex = Regex::new(pattern)
        .map_err(|e| Error::InternalError(format!("invalid identifier pattern `{pattern}`: {e}")))?;
    Ok(regex.is_match(candidate))
}

/// Fixed-shape identifier described by an anchored regex pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierFormat {
    pattern: &'static str,
}

impl IdentifierFormat {
    /// Create a format from an anchored pattern.
    #[must_use]
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    /// Returns the pattern.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Returns true if `candidate` has exactly this shape.
    ///
    /// An invalid pattern matches nothing.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        matches(self.pattern, candidate).unwrap_or_else(|err| {
            warn!(error = %err, "identifier pattern rejected");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_matches() {
        assert!(PUBLIC_CLOUD_PROJECT_ID.matches("aabbccddeeff40000000000000000000"));
        assert!(PUBLIC_CLOUD_PROJECT_ID.matches("0123456789ab4cdef0123456789abcde"));
    }

    #[test]
    fn placeholder_domain_does_not_match() {
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("*"));
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches(""));
    }

    #[test]
    fn marker_is_required() {
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("aabbccddeeff50000000000000000000"));
    }

    #[test]
    fn length_is_exact() {
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("aabbccddeeff4000000000000000000"));
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("aabbccddeeff400000000000000000000"));
    }

    #[test]
    fn only_lowercase_hex() {
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("AABBCCDDEEFF40000000000000000000"));
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("aabbccddeegg40000000000000000000"));
        assert!(!PUBLIC_CLOUD_PROJECT_ID.matches("aabbccdd-eff40000000000000000000"));
    }

    #[test]
    fn pattern_function_is_usable_directly() {
        assert!(matches(PUBLIC_CLOUD_PROJECT_PATTERN, "aabbccddeeff40000000000000000000").unwrap());
        assert!(!matches(r"^pn-[0-9]+$", "pn-x").unwrap());
        assert!(matches(r"^pn-[0-9]+$", "pn-1000").unwrap());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = matches("^[0-9", "0").unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!IdentifierFormat::new("^[0-9").matches("0"));
    }
}
