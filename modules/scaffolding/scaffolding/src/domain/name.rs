use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Longest accepted identity name, in characters, after trimming.
pub const MAX_IDENTITY_NAME_LENGTH: usize = 128;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._@-]+$").expect("static regex should not panic")
});

/// Why a raw identity name was rejected. Checks run in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("Identity name is required")]
    Empty,

    #[error("Identity name exceeds maximum length of {max}")]
    TooLong { max: usize },

    #[error("Identity name contains invalid characters")]
    InvalidCharacters,
}

/// A validated, trimmed identity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityName(String);

impl IdentityName {
    /// Trim `raw` and validate it.
    ///
    /// Trimming strips only ASCII control characters and spaces (`<= U+0020`);
    /// other Unicode whitespace stays and fails the charset check.
    ///
    /// # Errors
    /// The first rule the trimmed value breaks.
    pub fn parse(raw: &str) -> Result<Self, NameValidationError> {
        let trimmed = trim_control_and_space(raw);
        if trimmed.is_empty() {
            return Err(NameValidationError::Empty);
        }
        if trimmed.chars().count() > MAX_IDENTITY_NAME_LENGTH {
            return Err(NameValidationError::TooLong {
                max: MAX_IDENTITY_NAME_LENGTH,
            });
        }
        if !NAME_PATTERN.is_match(trimmed) {
            return Err(NameValidationError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn trim_control_and_space(raw: &str) -> &str {
    raw.trim_matches(|c: char| c <= ' ')
}

impl fmt::Display for IdentityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Make a caller-supplied value safe to embed in a log line.
///
/// Carriage returns and line feeds become `_`.
#[must_use]
pub fn sanitize_for_log(value: &str) -> Cow<'_, str> {
    if value.contains(['\r', '\n']) {
        Cow::Owned(value.replace(['\r', '\n'], "_"))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_characters() {
        for raw in ["bob", "john.doe@example.com", "svc-account_01", "A.B-C_D@E"] {
            assert_eq!(IdentityName::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn trims_before_validation() {
        let name = IdentityName::parse("  bob \t").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert_eq!(name, IdentityName::parse("bob").unwrap());
    }

    #[test]
    fn trims_ascii_control_characters() {
        assert_eq!(IdentityName::parse("\u{1}bob\u{1f}").unwrap().as_str(), "bob");
        assert_eq!(IdentityName::parse("\r\nbob\0").unwrap().as_str(), "bob");
        assert_eq!(IdentityName::parse("\u{7}\u{8}"), Err(NameValidationError::Empty));
    }

    #[test]
    fn unicode_whitespace_is_not_trimmed() {
        for raw in ["\u{a0}bob", "bob\u{a0}", "\u{2003}bob\u{2003}", "\u{3000}bob"] {
            assert_eq!(
                IdentityName::parse(raw),
                Err(NameValidationError::InvalidCharacters),
                "{} should be rejected",
                raw.escape_debug()
            );
        }
    }

    #[test]
    fn blank_is_required_error() {
        assert_eq!(IdentityName::parse(""), Err(NameValidationError::Empty));
        assert_eq!(IdentityName::parse("   "), Err(NameValidationError::Empty));
        assert_eq!(
            NameValidationError::Empty.to_string(),
            "Identity name is required"
        );
    }

    #[test]
    fn length_limit_is_inclusive() {
        let at_limit = "a".repeat(MAX_IDENTITY_NAME_LENGTH);
        assert!(IdentityName::parse(&at_limit).is_ok());

        let padded = format!("  {at_limit}  ");
        assert!(IdentityName::parse(&padded).is_ok());

        let over = "a".repeat(MAX_IDENTITY_NAME_LENGTH + 1);
        let err = IdentityName::parse(&over).unwrap_err();
        assert_eq!(err.to_string(), "Identity name exceeds maximum length of 128");
    }

    #[test]
    fn length_is_checked_before_charset() {
        let over = "$".repeat(MAX_IDENTITY_NAME_LENGTH + 1);
        assert!(matches!(
            IdentityName::parse(&over),
            Err(NameValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn rejects_disallowed_characters() {
        for raw in ["john doe", "a\nb", "bob;drop", "name/with/slash", "caf\u{e9}", "a+b"] {
            assert_eq!(
                IdentityName::parse(raw),
                Err(NameValidationError::InvalidCharacters),
                "{} should be rejected",
                raw.escape_debug()
            );
        }
        assert_eq!(
            NameValidationError::InvalidCharacters.to_string(),
            "Identity name contains invalid characters"
        );
    }

    #[test]
    fn sanitize_replaces_line_breaks() {
        assert_eq!(sanitize_for_log("a\nb"), "a_b");
        assert_eq!(sanitize_for_log("a\r\nb"), "a__b");
        assert!(matches!(sanitize_for_log("plain"), Cow::Borrowed("plain")));
    }
}
