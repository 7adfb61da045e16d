//! Calendar date shape check (`YYYY-MM-DD`).

/// Returns true iff `s` is four digits, `-`, two digits, `-`, two digits.
///
/// Shape only: `2024-13-99` passes. Month and day ranges are the record
/// store's concern.
pub fn is_valid_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
