use std::borrow::Cow;

/// Decodes [backslash
/// escaped](http://www.saremba.de/chessgml/standards/pgn/pgn-complete.htm#c7)
/// tag values. Allocates only when the value actually contains escape
/// sequences.
///
/// > A quote inside a string is represented by the backslash immediately
/// > followed by a quote. A backslash inside a string is represented by
/// > two adjacent backslashes.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    let mut head = 0;
    let mut decoded = String::new();
    for escape in memchr::memchr_iter(b'\\', bytes) {
        if escape < head {
            // Escaped backslash, already copied.
            continue;
        }
        match bytes.get(escape + 1) {
            Some(b'\\' | b'"') => {
                decoded.push_str(&raw[head..escape]);
                decoded.push(char::from(bytes[escape + 1]));
                head = escape + 2;
            }
            _ => (),
        }
    }
    if head == 0 {
        Cow::Borrowed(raw)
    } else {
        decoded.push_str(&raw[head..]);
        Cow::Owned(decoded)
    }
}
