use core::fmt::Write as _;

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_null() -> &'static str {
    "null"
}

fn push_escaped(out: &mut String, ch: char, ascii_only: bool) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x08' => out.push_str("\\b"),
        '\x0C' => out.push_str("\\f"),
        c if (c as u32) < 0x20 => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c if ascii_only && (c as u32) >= 0x7F => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
        c => out.push(c),
    }
}

/// Appends `s` as a quoted JSON string.
pub fn escape_and_quote_into(out: &mut String, s: &str, ascii_only: bool) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        push_escaped(out, ch, ascii_only);
    }
    out.push('"');
}

/// Appends `bytes` as a quoted JSON string holding one character per byte,
/// each with the code point equal to the byte value.
pub fn latin1_quote_into(out: &mut String, bytes: &[u8], ascii_only: bool) {
    out.reserve(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        push_escaped(out, char::from(b), ascii_only);
    }
    out.push('"');
}
