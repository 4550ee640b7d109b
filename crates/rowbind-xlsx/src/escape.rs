//! Excel's `_xHHHH_` escapes for characters XML cannot carry
//!
//! - `_x000d_` = CR (carriage return)
//! - `_x0001_` = other control characters
//! - `_x005f_` = an underscore that would otherwise start an escape

/// Length of one `_xHHHH_` sequence
const ESCAPE_LEN: usize = 7;

/// Parse the `_xHHHH_` sequence at the start of `bytes`, if there is one
fn escape_at(bytes: &[u8]) -> Option<u32> {
    if bytes.len() < ESCAPE_LEN || bytes[0] != b'_' || bytes[1] != b'x' || bytes[6] != b'_' {
        return None;
    }
    let hex = &bytes[2..6];
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    // Four ASCII hex digits are always valid UTF-8
    u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()
}

/// Decode `_xHHHH_` sequences in cell text
pub(crate) fn decode(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(c) = escape_at(&bytes[pos..]).and_then(char::from_u32) {
            result.push(c);
            pos += ESCAPE_LEN;
            continue;
        }
        // `pos` always sits on a char boundary: escapes are pure ASCII
        let c = s[pos..].chars().next().unwrap_or_default();
        result.push(c);
        pos += c.len_utf8().max(1);
    }

    result
}

/// Encode characters that cannot appear in XML text, and underscores that
/// would be read back as an escape
pub(crate) fn encode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());

    for (pos, c) in s.char_indices() {
        let needs_escape = match c {
            '\t' | '\n' => false,
            '_' => escape_at(&bytes[pos..]).is_some(),
            '\u{FFFE}' | '\u{FFFF}' => true,
            c => c.is_control() && (c as u32) < 0x20,
        };

        if needs_escape {
            result.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode("plain"), "plain");
        assert_eq!(decode("a_x000D_b"), "a\rb");
        assert_eq!(decode("_x005f_x0041_"), "_x0041_");
        assert_eq!(decode("_x00"), "_x00");
        assert_eq!(decode("_xZZZZ_"), "_xZZZZ_");
        assert_eq!(decode("über_x0009_"), "über\t");
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("plain_text"), "plain_text");
        assert_eq!(encode("a\rb"), "a_x000D_b");
        assert_eq!(encode("tab\tnewline\n"), "tab\tnewline\n");
        assert_eq!(encode("\u{1}"), "_x0001_");
        assert_eq!(encode("_x0041_"), "_x005F_x0041_");
    }

    #[test]
    fn test_roundtrip() {
        for s in ["", "_x", "_x005F_", "a\r\n\u{7}b", "snake_case_x1234_end", "日本_x0020_"] {
            assert_eq!(decode(&encode(s)), s);
        }
    }
}
