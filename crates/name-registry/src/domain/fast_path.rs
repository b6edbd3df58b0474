//! # Fast Canonicalization
//!
//! Single-pass byte scanner used by the fast registration path.
//!
//! It accepts and rejects exactly the inputs [`name::validate`] does, with the
//! same error variant and payload, but walks the input once, folds case while
//! copying, and allocates a single buffer.
//!
//! Scheme errors win over character errors, so a character error is only
//! remembered while the scan continues looking for a stray `://`.
//!
//! [`name::validate`]: super::name::validate

use super::errors::RegistryError;
use super::name::is_alphanumeric;
use super::value_objects::CanonicalName;

const HTTPS: &[u8] = b"https://";
const HTTP: &[u8] = b"http://";

/// Validates and normalizes `raw` in one pass.
pub fn canonicalize(raw: &str) -> Result<CanonicalName, RegistryError> {
    let bytes = raw.as_bytes();
    let start = if bytes.starts_with(HTTPS) {
        HTTPS.len()
    } else if bytes.starts_with(HTTP) {
        HTTP.len()
    } else {
        0
    };

    let body = &bytes[start..];
    let mut out = Vec::with_capacity(body.len());
    let mut shape_ok = true;
    let mut label_len = 0usize;
    let mut prev = 0u8;

    for (i, &b) in body.iter().enumerate() {
        if b == b':' && body[i + 1..].starts_with(b"//") {
            return Err(scheme_error(raw));
        }
        if !shape_ok {
            continue;
        }

        let c = b.to_ascii_lowercase();
        match c {
            b'.' => {
                if label_len == 0 || prev == b'-' {
                    shape_ok = false;
                }
                label_len = 0;
            }
            b'-' => {
                if label_len == 0 {
                    shape_ok = false;
                }
                label_len += 1;
            }
            _ if is_alphanumeric(c) => label_len += 1,
            _ => shape_ok = false,
        }
        prev = c;
        out.push(c);
    }

    if !shape_ok || label_len == 0 || prev == b'-' {
        return Err(character_error(raw));
    }

    String::from_utf8(out)
        .map(CanonicalName::new_unchecked)
        .map_err(|_| character_error(raw))
}

fn scheme_error(raw: &str) -> RegistryError {
    RegistryError::Scheme {
        name: raw.to_string(),
    }
}

fn character_error(raw: &str) -> RegistryError {
    RegistryError::InvalidCharacter {
        name: raw.to_string(),
    }
}
