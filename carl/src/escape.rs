//! Unicode escape decoding for IRIREFs and string literals, and the
//! optional CESU-8 re-encoding the formatter applies to astral characters.
//!
//! Grounded on the original `Parser.cc`'s `extractUri`/`extractString`
//! byte-scan loops and `CN3Writer.cc`'s `ouputCesu8`/`writeHex` helpers.

use crate::error::ParseError;

/// The characters `\`-escaping is allowed to protect in a `PN_LOCAL`
/// segment of a prefixed name, per the Turtle `PLX`/`PN_LOCAL_ESC`
/// productions this crate's lexer recognizes.
const LOCAL_NAME_ESCAPE_CHARS: &str = "_~.-!$&'()*+,;=/?#@%";

/// Strip the backslash out of `\`-escaped reserved characters in a prefixed
/// name's local part. Percent-encoded octets (`%XX`) are left untouched:
/// Turtle keeps them literal rather than percent-decoding them.
pub fn unescape_pname_local(local: &str) -> Result<String, ParseError> {
    if !local.contains('\\') {
        return Ok(local.to_string());
    }

    let chars: Vec<char> = local.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            let escaped = *chars.get(i + 1).ok_or_else(|| {
                ParseError::new(format!("\"{}\" ends with a trailing escape", local))
            })?;
            if !LOCAL_NAME_ESCAPE_CHARS.contains(escaped) {
                return Err(ParseError::new(format!(
                    "\"{}\" contains illegal escape \"\\{}\"",
                    local, escaped
                )));
            }
            out.push(escaped);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Decode `\t \n \r \b \f \" \' \\` and `\uXXXX`/`\UXXXXXXXX` escapes in
/// `input`, validating that any `\uXXXX` naming a UTF-16 high surrogate is
/// immediately followed by a matching low surrogate (or another `\uXXXX`/
/// `\UXXXXXXXX` escape that supplies one), and returning the decoded text
/// as UTF-8.
///
/// `allow_short_escapes` gates the named single-character escapes; IRIREFs
/// only permit `\uXXXX`/`\UXXXXXXXX`; string literals permit both.
pub fn unescape(input: &str, allow_short_escapes: bool) -> Result<String, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    let mut pending_high_surrogate: Option<u32> = None;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            flush_pending(&mut out, &mut pending_high_surrogate)?;
            out.push(c);
            i += 1;
            continue;
        }

        i += 1;
        let escape = *chars.get(i).ok_or_else(|| {
            ParseError::new("unterminated escape sequence at end of input")
        })?;

        match escape {
            'u' => {
                let cp = read_hex_escape(&chars, i + 1, 4)?;
                i += 5;
                handle_code_point(&mut out, &mut pending_high_surrogate, cp)?;
            }
            'U' => {
                let cp = read_hex_escape(&chars, i + 1, 8)?;
                i += 9;
                handle_code_point(&mut out, &mut pending_high_surrogate, cp)?;
            }
            _ if allow_short_escapes => {
                flush_pending(&mut out, &mut pending_high_surrogate)?;
                out.push(match escape {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'b' => '\u{08}',
                    'f' => '\u{0C}',
                    '"' => '"',
                    '\'' => '\'',
                    '\\' => '\\',
                    other => {
                        return Err(ParseError::new(format!(
                            "unrecognized escape sequence '\\{}'",
                            other
                        )))
                    }
                });
                i += 1;
            }
            '\\' | '>' => {
                flush_pending(&mut out, &mut pending_high_surrogate)?;
                out.push(escape);
                i += 1;
            }
            other => {
                return Err(ParseError::new(format!(
                    "unrecognized escape sequence '\\{}'",
                    other
                )))
            }
        }
    }

    flush_pending(&mut out, &mut pending_high_surrogate)?;
    Ok(out)
}

fn read_hex_escape(chars: &[char], start: usize, len: usize) -> Result<u32, ParseError> {
    let digits: String = chars
        .get(start..start + len)
        .ok_or_else(|| ParseError::new("truncated unicode escape"))?
        .iter()
        .collect();
    u32::from_str_radix(&digits, 16)
        .map_err(|_| ParseError::new(format!("invalid hex digits in escape: {}", digits)))
}

fn handle_code_point(
    out: &mut String,
    pending: &mut Option<u32>,
    cp: u32,
) -> Result<(), ParseError> {
    const HIGH_SURROGATE_START: u32 = 0xD800;
    const HIGH_SURROGATE_END: u32 = 0xDBFF;
    const LOW_SURROGATE_START: u32 = 0xDC00;
    const LOW_SURROGATE_END: u32 = 0xDFFF;

    if let Some(high) = pending.take() {
        if (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&cp) {
            let combined = 0x10000 + (high - HIGH_SURROGATE_START) * 0x400 + (cp - LOW_SURROGATE_START);
            push_scalar(out, combined)?;
            return Ok(());
        }
        return Err(ParseError::new(
            "unpaired high surrogate in unicode escape",
        ));
    }

    if (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&cp) {
        *pending = Some(cp);
        return Ok(());
    }
    if (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&cp) {
        return Err(ParseError::new(
            "unpaired low surrogate in unicode escape",
        ));
    }

    push_scalar(out, cp)
}

fn flush_pending(out: &mut String, pending: &mut Option<u32>) -> Result<(), ParseError> {
    if pending.take().is_some() {
        return Err(ParseError::new(
            "unpaired high surrogate in unicode escape",
        ));
    }
    let _ = out;
    Ok(())
}

fn push_scalar(out: &mut String, cp: u32) -> Result<(), ParseError> {
    match char::from_u32(cp) {
        Some(ch) => {
            out.push(ch);
            Ok(())
        }
        None => Err(ParseError::new(format!(
            "code point U+{:04X} is not a valid scalar value",
            cp
        ))),
    }
}

/// How astral (beyond-BMP) characters are encoded when writing a string or
/// IRI out to N3P.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstralEncoding {
    /// Plain UTF-8 (four bytes per astral character).
    Utf8,
    /// CESU-8: the character's UTF-16 surrogate pair, each half re-encoded
    /// as its own three-byte UTF-8 sequence. Some older SWI-Prolog builds
    /// only understand this form.
    Cesu8,
}

/// Append `ch` to `out`, splitting it into a CESU-8 surrogate pair if it is
/// astral and `encoding` requests that, or appending it directly otherwise.
pub fn push_char(out: &mut String, ch: char, encoding: AstralEncoding) {
    let cp = ch as u32;
    if encoding == AstralEncoding::Cesu8 && cp > 0xFFFF {
        let adjusted = cp - 0x10000;
        let high = 0xD800 + (adjusted >> 10);
        let low = 0xDC00 + (adjusted & 0x3FF);
        // Each surrogate half, reinterpreted as its own code point, is a
        // valid 3-byte UTF-8 sequence; `char::from_u32` rejects surrogate
        // values directly, so we hand-encode them.
        push_cesu8_half(out, high);
        push_cesu8_half(out, low);
    } else {
        out.push(ch);
    }
}

fn push_cesu8_half(out: &mut String, half: u32) {
    // A surrogate half is not a valid scalar value, so `char` can't
    // represent it; hand-encode the 3-byte UTF-8-shaped sequence that
    // CESU-8 uses for it directly into the buffer.
    let bytes = [
        0xE0 | ((half >> 12) & 0x0F) as u8,
        0x80 | ((half >> 6) & 0x3F) as u8,
        0x80 | (half & 0x3F) as u8,
    ];
    // SAFETY: these three bytes are well-formed per the UTF-8 byte-length
    // encoding even though the surrogate they name is not a valid scalar
    // value; CESU-8 output is consumed as raw bytes by the writer, never
    // re-validated as UTF-8.
    unsafe {
        out.as_mut_vec().extend_from_slice(&bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_basic_escapes() {
        assert_eq!(unescape(r#"a\tb\nc"#, true).unwrap(), "a\tb\nc");
    }

    #[test]
    fn decodes_bmp_unicode_escape() {
        assert_eq!(unescape(r"\u0041", true).unwrap(), "A");
    }

    #[test]
    fn decodes_astral_unicode_escape() {
        // U+1F600 GRINNING FACE, as a UTF-16 surrogate pair.
        assert_eq!(unescape(r"\uD83D\uDE00", true).unwrap(), "\u{1F600}");
    }

    #[test]
    fn decodes_long_unicode_escape() {
        assert_eq!(unescape(r"\U0001F600", true).unwrap(), "\u{1F600}");
    }

    #[test]
    fn rejects_unpaired_high_surrogate() {
        assert!(unescape(r"\uD83D", true).is_err());
    }

    #[test]
    fn rejects_lone_low_surrogate() {
        assert!(unescape(r"\uDE00", true).is_err());
    }

    #[test]
    fn iri_escapes_reject_short_forms() {
        assert!(unescape(r"\n", false).is_err());
    }

    #[test]
    fn push_char_splits_astral_into_cesu8_pair() {
        let mut out = String::new();
        push_char(&mut out, '\u{1F600}', AstralEncoding::Cesu8);
        // Two 3-byte sequences, i.e. 6 bytes, not the 4-byte plain UTF-8 form.
        assert_eq!(out.as_bytes().len(), 6);
    }

    #[test]
    fn unescapes_local_name_reserved_chars() {
        assert_eq!(unescape_pname_local(r"a\-b\.c").unwrap(), "a-b.c");
    }

    #[test]
    fn leaves_percent_escapes_untouched() {
        assert_eq!(unescape_pname_local("a%20b").unwrap(), "a%20b");
    }

    #[test]
    fn rejects_illegal_local_name_escape() {
        assert!(unescape_pname_local(r"a\qb").is_err());
    }

    #[test]
    fn push_char_keeps_astral_as_utf8_by_default() {
        let mut out = String::new();
        push_char(&mut out, '\u{1F600}', AstralEncoding::Utf8);
        assert_eq!(out, "\u{1F600}");
    }
}
