//! # Name Validator
//!
//! Turns a raw caller-supplied string into a [`CanonicalName`].
//!
//! ## Rules
//!
//! 1. If the input contains `://` anywhere it must begin with exactly
//!    `http://` or `https://`; that prefix is stripped once.
//! 2. The remainder must not contain `://`.
//! 3. ASCII letters are folded to lowercase.
//! 4. Splitting on `.` must yield non-empty labels matching
//!    `[a-z0-9]([a-z0-9-]*[a-z0-9])?`.
//!
//! Scheme errors take precedence over character errors.

use super::errors::RegistryError;
use super::value_objects::CanonicalName;

/// Separator between a scheme and the rest of the input.
pub const SCHEME_SEPARATOR: &str = "://";

/// Scheme prefixes accepted and stripped before validation.
pub const ACCEPTED_SCHEMES: [&str; 2] = ["https://", "http://"];

/// Separator between labels.
pub const LABEL_SEPARATOR: char = '.';

/// Validates and normalizes `raw`.
pub fn validate(raw: &str) -> Result<CanonicalName, RegistryError> {
    let stripped = strip_scheme(raw)?;
    let lowered = stripped.to_ascii_lowercase();

    if !lowered.split(LABEL_SEPARATOR).all(is_valid_label) {
        return Err(RegistryError::InvalidCharacter {
            name: raw.to_string(),
        });
    }

    Ok(CanonicalName::new_unchecked(lowered))
}

/// Normalizes `raw` for lookup: strips a leading accepted scheme and folds
/// case, without checking the label grammar.
///
/// Scheme-qualified and bare forms of a registered name map to the same key.
pub fn normalize_for_lookup(raw: &str) -> String {
    let rest = ACCEPTED_SCHEMES
        .iter()
        .find_map(|scheme| raw.strip_prefix(scheme))
        .unwrap_or(raw);
    rest.to_ascii_lowercase()
}

/// Applies rules 1 and 2, returning the input with its scheme removed.
fn strip_scheme(raw: &str) -> Result<&str, RegistryError> {
    if !raw.contains(SCHEME_SEPARATOR) {
        return Ok(raw);
    }

    let rest = ACCEPTED_SCHEMES
        .iter()
        .find_map(|scheme| raw.strip_prefix(scheme))
        .ok_or_else(|| RegistryError::Scheme {
            name: raw.to_string(),
        })?;

    if rest.contains(SCHEME_SEPARATOR) {
        return Err(RegistryError::Scheme {
            name: raw.to_string(),
        });
    }

    Ok(rest)
}

/// Checks one lowercase label against the label grammar.
pub fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            is_alphanumeric(*first)
                && is_alphanumeric(*last)
                && bytes.iter().all(|b| is_alphanumeric(*b) || *b == b'-')
        }
        _ => false,
    }
}

#[inline]
pub(crate) fn is_alphanumeric(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        assert_eq!(validate("com").unwrap().as_str(), "com");
        assert_eq!(validate("kos-data.com").unwrap().as_str(), "kos-data.com");
        assert_eq!(validate("a1.b2.c3").unwrap().as_str(), "a1.b2.c3");
        assert_eq!(validate("x").unwrap().as_str(), "x");
    }

    #[test]
    fn test_uppercase_is_folded() {
        assert_eq!(validate("UA").unwrap().as_str(), "ua");
        assert_eq!(validate("Com").unwrap().as_str(), "com");
        assert_eq!(validate("eXample").unwrap().as_str(), "example");
    }

    #[test]
    fn test_invalid_characters() {
        let rejected = [
            ".com", "com.", "-com", "ua-", "domain@name", "special*char", "", "a..b", "a_b", "é",
        ];
        for raw in rejected {
            let err = validate(raw).unwrap_err();
            assert!(
                matches!(err, RegistryError::InvalidCharacter { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_scheme_is_stripped() {
        assert_eq!(validate("http://x.com").unwrap().as_str(), "x.com");
        assert_eq!(validate("https://x.com").unwrap().as_str(), "x.com");
        assert_eq!(validate("https://X.Com").unwrap().as_str(), "x.com");
    }

    #[test]
    fn test_scheme_errors() {
        for raw in [
            "kos-https://data.com",
            "ftp://x.com",
            "://x",
            "HTTP://x.com",
            "http://https://x.com",
            "https://x://y",
        ] {
            let err = validate(raw).unwrap_err();
            assert!(matches!(err, RegistryError::Scheme { .. }), "{raw:?} gave {err:?}");
        }
    }

    #[test]
    fn test_scheme_without_host_is_a_character_error() {
        assert!(matches!(
            validate("http://"),
            Err(RegistryError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_normalize_for_lookup() {
        assert_eq!(normalize_for_lookup("https://Kos-Data.com"), "kos-data.com");
        assert_eq!(normalize_for_lookup("http://x"), "x");
        assert_eq!(normalize_for_lookup("X.COM"), "x.com");
        // No grammar check on lookup.
        assert_eq!(normalize_for_lookup("a@b"), "a@b");
    }

    #[test]
    fn test_label_grammar() {
        assert!(is_valid_label("a"));
        assert!(is_valid_label("a-b"));
        assert!(is_valid_label("a--b"));
        assert!(is_valid_label("0"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("-"));
        assert!(!is_valid_label("a-"));
        assert!(!is_valid_label("A"));
    }
}
