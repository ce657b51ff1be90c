//! Byte classification predicates used by the tokenizer.
//!
//! All predicates are pure functions over a single byte. The tokenizer's
//! scanning rules are written in terms of these classes rather than inline
//! range checks so that the lexical grammar reads off the rule bodies.

/// Whitespace: space, tab, vertical tab, form feed, and the line
/// terminators `\n`/`\r`.
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | 0x0b | 0x0c | b'\n' | b'\r')
}

/// Line terminators. Each occurrence ends a line and resets the column.
pub(crate) fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

pub(crate) fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

pub(crate) fn is_hex_digit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

pub(crate) fn is_octal_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'7')
}

/// Identifier start: a letter. Note that an underscore does not start an
/// identifier; it is only permitted as a continuation byte.
pub(crate) fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Identifier continuation: letters, digits, underscore.
pub(crate) fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Integer literal suffix letters (`42u`, `0x1FUL`).
pub(crate) fn is_int_suffix(byte: u8) -> bool {
    matches!(byte, b'u' | b'U' | b'l' | b'L')
}

/// Floating literal suffix letters (`1.5f`, `2.0L`).
pub(crate) fn is_float_suffix(byte: u8) -> bool {
    matches!(byte, b'f' | b'F' | b'l' | b'L')
}
