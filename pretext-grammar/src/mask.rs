//! Reversible masking of quoted-string interiors.
//!
//! Every character between a quote and its unescaped closing quote is
//! replaced by a lowercase hexadecimal byte pair; the quotes themselves
//! stay. Once masked, later passes can treat `{`, `}`, `:`, `|` and `;`
//! as structural without being fooled by literals like `"{"`.
//! [`restore`] is the inverse: `restore(mask(x)) == x`.
//!
//! Double quotes always delimit a string; a lone unterminated `"` is a
//! fatal input error. Single quotes are masked only when they form a
//! character literal (`'x'` or `'\x'`), so an apostrophe in prose or a
//! comment is ordinary text.

use std::fmt;
use std::str::{CharIndices, Chars};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// A quote opened at byte `offset` never closes.
    UnterminatedQuote { offset: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::UnterminatedQuote { offset } => {
                write!(f, "unterminated quote at byte offset {}", offset)
            }
        }
    }
}

impl std::error::Error for MaskError {}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex(out: &mut String, ch: char) {
    let mut buf = [0u8; 4];
    for &byte in ch.encode_utf8(&mut buf).as_bytes() {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
}

/// Hex-encode the interior of every quoted region. A backslash escapes
/// the next character, so an escaped quote does not terminate a string.
pub fn mask(text: &str) -> Result<String, MaskError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => {
                out.push('"');
                let mut closed = false;
                while let Some((_, inner)) = chars.next() {
                    if inner == '"' {
                        out.push('"');
                        closed = true;
                        break;
                    }
                    push_hex(&mut out, inner);
                    if inner == '\\' {
                        if let Some((_, escaped)) = chars.next() {
                            push_hex(&mut out, escaped);
                        }
                    }
                }
                if !closed {
                    return Err(MaskError::UnterminatedQuote { offset });
                }
            }
            '\'' => {
                out.push('\'');
                if let Some(interior) = mask_char_literal(&mut chars) {
                    out.push_str(&interior);
                    out.push('\'');
                }
            }
            _ => out.push(ch),
        }
    }
    Ok(out)
}

/// Consume a `'x'` / `'\x'` literal after its opening quote, returning
/// the hex-encoded interior. Leaves the iterator untouched when the
/// upcoming text is not a character literal, so a bare apostrophe stays
/// inert.
fn mask_char_literal(chars: &mut CharIndices<'_>) -> Option<String> {
    let mut lookahead = chars.clone();
    let mut interior = String::new();
    match lookahead.next()?.1 {
        '\'' => return None,
        '\\' => {
            push_hex(&mut interior, '\\');
            push_hex(&mut interior, lookahead.next()?.1);
        }
        plain => push_hex(&mut interior, plain),
    }
    match lookahead.next() {
        Some((_, '\'')) => {
            *chars = lookahead;
            Some(interior)
        }
        _ => None,
    }
}

/// Decode the quoted interiors back to their original characters.
///
/// Only defined on masked text; anything inside double quotes that is
/// not a hex byte pair is passed through unchanged, and a single-quoted
/// span is decoded only when it is exactly a masked character literal.
pub fn restore(text: &str) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push(b'"');
                let mut interior = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '"' {
                        closed = true;
                        break;
                    }
                    interior.push(inner);
                }
                decode_hex_into(&interior, &mut out);
                if closed {
                    out.push(b'"');
                }
            }
            '\'' => {
                out.push(b'\'');
                if let Some(bytes) = restore_char_literal(&mut chars) {
                    out.extend_from_slice(&bytes);
                    out.push(b'\'');
                }
            }
            _ => push_char(&mut out, ch),
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Consume a masked character literal after its opening quote: a short,
/// even run of hex digits up to a closing quote, decoding to exactly one
/// character (optionally backslash-escaped). Anything else leaves the
/// iterator untouched.
fn restore_char_literal(chars: &mut Chars<'_>) -> Option<Vec<u8>> {
    let mut lookahead = chars.clone();
    let mut digits = String::new();
    loop {
        let ch = lookahead.next()?;
        if ch == '\'' {
            break;
        }
        if !ch.is_ascii_hexdigit() || digits.len() >= 10 {
            return None;
        }
        digits.push(ch);
    }
    if digits.is_empty() || digits.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let mut pairs = digits.chars();
    while let Some(hi) = pairs.next() {
        let lo = pairs.next()?;
        bytes.push(((hi.to_digit(16)? as u8) << 4) | lo.to_digit(16)? as u8);
    }
    let decoded = std::str::from_utf8(&bytes).ok()?;
    let mut decoded_chars = decoded.chars();
    let shape_ok = match decoded_chars.next()? {
        '\\' => decoded_chars.next().is_some() && decoded_chars.next().is_none(),
        _ => decoded_chars.next().is_none(),
    };
    if !shape_ok {
        return None;
    }
    *chars = lookahead;
    Some(bytes)
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

fn decode_hex_into(interior: &str, out: &mut Vec<u8>) {
    let mut chars = interior.chars().peekable();
    while let Some(ch) = chars.next() {
        let hi = ch.to_digit(16);
        let lo = chars.peek().and_then(|next| next.to_digit(16));
        if let (Some(hi), Some(lo)) = (hi, lo) {
            chars.next();
            out.push(((hi as u8) << 4) | lo as u8);
        } else {
            push_char(out, ch);
        }
    }
}
