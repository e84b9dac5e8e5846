use std::borrow::Cow;

/// Fully percent-decodes one raw path segment.
///
/// The segment must already be split from its path; an encoded slash (`%2F`) decodes to a
/// literal `/` in the returned value. Incomplete or non-hex escapes are kept as they are and
/// invalid UTF-8 produced by decoding is replaced with `U+FFFD`.
///
/// Returns the input unchanged when it contains no valid escape.
pub fn decode_segment(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();

    let Some(first) = next_escape(bytes, 0) else {
        return Cow::Borrowed(raw);
    };

    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..first]);

    let mut idx = first;
    while idx < bytes.len() {
        match escaped_byte(&bytes[idx..]) {
            Some(byte) => {
                buf.push(byte);
                idx += 3;
            }
            None => {
                buf.push(bytes[idx]);
                idx += 1;
            }
        }
    }

    Cow::Owned(String::from_utf8_lossy(&buf).into_owned())
}

/// Position of the first valid `%XX` escape at or after `from`.
fn next_escape(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&idx| escaped_byte(&bytes[idx..]).is_some())
}

/// Byte encoded by a `%XX` escape at the start of `bytes`.
#[inline]
fn escaped_byte(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [b'%', hi, lo, ..] => Some(hex_digit(*hi)? << 4 | hex_digit(*lo)?),
        _ => None,
    }
}

#[inline]
fn hex_digit(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|val| val as u8)
}
