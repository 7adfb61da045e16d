//! Random unique identifier (UUID v4) shape check.
//!
//! The check is positional rather than a full parse: `Uuid::parse_str` also
//! accepts braced, URN and simple forms and every version, none of which the
//! record store uses as keys.

const LENGTH: usize = 36;

/// Returns true iff `s` is a hyphenated, version-4, RFC 4122 variant UUID.
///
/// Case-insensitive. Never fails; anything non-conforming is `false`.
pub fn is_valid_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == LENGTH
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            14 => b == b'4',
            19 => matches!(b.to_ascii_lowercase(), b'8' | b'9' | b'a' | b'b'),
            _ => b.is_ascii_hexdigit(),
        })
}
