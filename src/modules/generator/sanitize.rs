//! Shell-safe identifiers for command paths
//!
//! A path of raw command names is encoded segment by segment. Within a
//! segment ASCII letters and digits are kept, `_` is doubled and every other
//! character becomes `_<hex codepoint>_`. Each encoded segment is framed as
//! `_<length>_<encoded>`, so distinct paths always yield distinct identifiers
//! and the result only ever contains `[A-Za-z0-9_]`.

use std::fmt::Write;

use tabsmith_core::{Result, TabsmithError};

/// Encode one raw name segment
pub fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => encoded.push(c),
            '_' => encoded.push_str("__"),
            other => {
                let _ = write!(encoded, "_{:x}_", u32::from(other));
            }
        }
    }
    encoded
}

/// Sanitize a root-to-node path of command names into an identifier fragment
pub fn sanitize<S: AsRef<str>>(path: &[S]) -> Result<String> {
    if path.is_empty() {
        return Err(TabsmithError::InvalidArgument(
            "Cannot sanitize an empty command path".to_string(),
        ));
    }

    let mut identifier = String::new();
    for segment in path {
        let encoded = encode_segment(segment.as_ref());
        let _ = write!(identifier, "_{}_{}", encoded.len(), encoded);
    }
    Ok(identifier)
}

/// Returns true if `s` can be used verbatim as a shell function or variable name
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
