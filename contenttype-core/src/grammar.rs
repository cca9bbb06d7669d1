//! Lexical rules shared by the `Content-Type` and `Accept` parsers.
//!
//! Everything here works on bytes. All delimiters are ASCII, so every slice
//! boundary produced by these functions falls on a `char` boundary.

/// `SP` or `HTAB`.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// `tchar` from RFC 7230 §3.2.6.
#[inline]
pub(crate) fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// `qdtext`: anything visible except `"` and `\`, plus whitespace and obs-text.
#[inline]
fn is_quoted_text_char(b: u8) -> bool {
    is_whitespace(b)
        || b == 0x21
        || (0x23..=0x5B).contains(&b)
        || (0x5D..=0x7E).contains(&b)
        || b >= 0x80
}

/// Characters allowed after a `\` inside a quoted string.
#[inline]
fn is_quoted_pair_char(b: u8) -> bool {
    is_whitespace(b) || (0x21..=0x7E).contains(&b) || b >= 0x80
}

pub(crate) fn skip_whitespace(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Consume a non-empty token, returning it lowercased with the rest of `s`.
pub(crate) fn consume_token(s: &str) -> Option<(String, &str)> {
    let end = s
        .bytes()
        .position(|b| !is_token_char(b))
        .unwrap_or(s.len());

    if end == 0 {
        return None;
    }

    Some((s[..end].to_ascii_lowercase(), &s[end..]))
}

/// Consume a quoted string, returning its unescaped, lowercased content.
pub(crate) fn consume_quoted_string(s: &str) -> Option<(String, &str)> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut value = Vec::new();
    let mut index = 1;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => {
                index += 1;
                let escaped = *bytes.get(index).filter(|b| is_quoted_pair_char(**b))?;
                value.push(escaped);
            }
            b if is_quoted_text_char(b) => value.push(b),
            _ => break,
        }
        index += 1;
    }

    if bytes.get(index) != Some(&b'"') {
        return None;
    }

    value.make_ascii_lowercase();
    let value = String::from_utf8(value).ok()?;
    Some((value, &s[index + 1..]))
}

/// Consume `type "/" subtype` with surrounding whitespace.
///
/// A wildcard type only pairs with a wildcard subtype.
pub(crate) fn consume_type(s: &str) -> Option<(String, String, &str)> {
    let (type_, s) = consume_token(skip_whitespace(s))?;
    let s = s.strip_prefix('/')?;
    let (subtype, s) = consume_token(s)?;

    if type_ == "*" && subtype != "*" {
        return None;
    }

    Some((type_, subtype, skip_whitespace(s)))
}

/// Consume `name "=" ( token / quoted-string )` with surrounding whitespace.
pub(crate) fn consume_parameter(s: &str) -> Option<(String, String, &str)> {
    let (name, s) = consume_token(skip_whitespace(s))?;
    let s = s.strip_prefix('=')?;
    let (value, s) = consume_token(s).or_else(|| consume_quoted_string(s))?;

    Some((name, value, skip_whitespace(s)))
}

/// Write a parameter value, quoting it when it is not a plain token.
pub(crate) fn write_value(f: &mut impl std::fmt::Write, value: &str) -> std::fmt::Result {
    if !value.is_empty() && value.bytes().all(is_token_char) {
        return f.write_str(value);
    }

    f.write_char('"')?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}
