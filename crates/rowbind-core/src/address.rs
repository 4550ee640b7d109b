//! Column addressing
//!
//! Spreadsheet columns are labelled in bijective base-26: `A` = 1 … `Z` = 26,
//! `AA` = 27, and there is no zero digit. All indices here are 1-based.

/// Convert a column label to its 1-based index (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive. Scanning stops at the first character that is
/// not an ASCII letter, so the row part of an A1-style reference is ignored.
/// A label with no leading letters yields 0. Very long labels saturate at
/// `u32::MAX`.
///
/// # Examples
/// ```
/// use rowbind_core::column_index;
///
/// assert_eq!(column_index("A"), 1);
/// assert_eq!(column_index("aa"), 27);
/// assert_eq!(column_index("XFD1048576"), 16384);
/// ```
pub fn column_index(label: &str) -> u32 {
    label
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .fold(0u32, |index, b| {
            let digit = (b.to_ascii_uppercase() - b'A' + 1) as u32;
            index.saturating_mul(26).saturating_add(digit)
        })
}

/// Convert a 1-based column index to its letter label (1 = A, 27 = AA, etc.)
///
/// Index 0 has no label and yields an empty string.
///
/// # Examples
/// ```
/// use rowbind_core::column_name;
///
/// assert_eq!(column_name(1), "A");
/// assert_eq!(column_name(702), "ZZ");
/// assert_eq!(column_name(0), "");
/// ```
pub fn column_name(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        letters.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Split an A1-style cell reference into its 1-based `(column, row)` pair
///
/// Returns `None` when either part is missing or the row is not a positive
/// number. Absolute markers (`$`) are not accepted.
pub fn split_reference(reference: &str) -> Option<(u32, u32)> {
    let split = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((column_index(letters), row))
}

/// Format a 1-based `(column, row)` pair as an A1-style reference
pub fn cell_reference(column: u32, row: u32) -> String {
    format!("{}{}", column_name(column), row)
}
