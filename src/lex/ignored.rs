use memchr::{memchr, memchr2};

/// The length of the run of ASCII whitespace at the start of `input`.
///
/// Note that this uses the built-in `.is_ascii_whitespace` and in particular
/// does not consider U+000B VERTICAL TAB to be whitespace.
#[inline]
pub fn whitespace_len(input: &[u8]) -> usize {
    input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len())
}

/// The length of a `%` comment at the start of `input`, up to but excluding the line ending.
#[inline]
pub fn line_comment_len(input: &[u8]) -> usize {
    debug_assert_eq!(input.first(), Some(&b'%'));
    match memchr(b'\n', input) {
        // leave a preceding '\r' to the whitespace token
        Some(idx) if idx > 1 && input[idx - 1] == b'\r' => idx - 1,
        Some(idx) => idx,
        None => input.len(),
    }
}

/// The length of a run of free text between entries: everything up to the next `@` or
/// line ending. The first byte always belongs to the run, so a stray `@` is absorbed.
#[inline]
pub fn free_text_len(input: &[u8]) -> usize {
    match input.get(1..).and_then(|tail| memchr2(b'@', b'\n', tail)) {
        Some(idx) => idx + 1,
        None => input.len(),
    }
}

/// Whether only spaces and tabs separate `pos` from the start of its line.
pub fn at_line_start(input: &[u8], pos: usize) -> bool {
    input[..pos]
        .iter()
        .rev()
        .find(|&&b| b != b' ' && b != b'\t')
        .is_none_or(|&b| b == b'\n' || b == b'\r')
}

/// The length of the body of a `@comment` entry, up to but excluding the closing bracket.
///
/// For a `{` body, this is the first `}` which is not balanced by a preceding `{`. For a `(`
/// body, this is the first `)` not enclosed in curly brackets. Returns `None` if the body is
/// never closed.
pub fn raw_body_len(input: &[u8], closing_bracket: u8) -> Option<usize> {
    let mut bracket_depth = 0usize;

    for (idx, &b) in input.iter().enumerate() {
        match b {
            b'{' => bracket_depth += 1,
            b'}' if bracket_depth > 0 => bracket_depth -= 1,
            _ if b == closing_bracket && bracket_depth == 0 => return Some(idx),
            _ => {}
        }
    }

    None
}
